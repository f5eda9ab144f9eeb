//! Small page behaviors: destructive-action confirmation, modal dismissal,
//! keyboard activation and the mobile menu.

use tracing::{debug, warn};

use crate::{Dom, Storefront};

pub const MOBILE_OPEN_CLASS: &str = "mobile-open";

impl<D: Dom> Storefront<D> {
    /// Ask before a destructive button's default action. `false` means the
    /// caller must cancel the event.
    pub fn confirm_destructive(&self) -> bool {
        let confirmed = self.dom.confirm(&self.config.messages.confirm_delete);
        if !confirmed {
            debug!("destructive action cancelled");
        }
        confirmed
    }

    /// Document-level keydown: Escape hides every modal. Returns how many
    /// modals were hidden.
    pub fn handle_escape(&self, key: &str) -> usize {
        if key != "Escape" {
            return 0;
        }
        let modals = self.dom.query_all(&self.config.selectors.modal);
        for modal in &modals {
            self.dom.set_style(modal, "display", "none");
        }
        debug!(count = modals.len(), "modals closed");
        modals.len()
    }

    /// Enter or space on a focused element activates it like a click.
    pub fn handle_keyboard_navigation(&self, key: &str, target: &D::Element) -> bool {
        if matches!(key, "Enter" | " ") {
            self.dom.click(target);
            true
        } else {
            false
        }
    }

    /// Collapse or expand the navigation bar on small screens. Returns whether
    /// it is open afterwards.
    pub fn toggle_mobile_menu(&self) -> bool {
        let selector = &self.config.selectors.navbar;
        match self.dom.query(selector) {
            Some(nav) => self.dom.toggle_class(&nav, MOBILE_OPEN_CLASS),
            None => {
                warn!(%selector, "no navigation bar to toggle");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorefrontConfig;
    use crate::testing::MockDom;
    use std::cell::Cell;
    use std::rc::Rc;

    fn storefront() -> (MockDom, Storefront<MockDom>) {
        let dom = MockDom::default();
        let sf = Storefront::new(dom.clone(), StorefrontConfig::default());
        (dom, sf)
    }

    #[test]
    fn escape_hides_every_modal() {
        let (dom, sf) = storefront();
        let body = dom.body_id();
        let modals: Vec<_> = (0..3)
            .map(|_| dom.add(body, "div", &[("class", "modal")]))
            .collect();
        dom.set_style(&modals[1], "display", "block");

        assert_eq!(sf.handle_escape("Escape"), 3);
        for modal in modals {
            assert_eq!(dom.style(modal, "display").as_deref(), Some("none"));
        }
    }

    #[test]
    fn other_keys_leave_modals_alone() {
        let (dom, sf) = storefront();
        let modal = dom.add(dom.body_id(), "div", &[("class", "modal")]);
        assert_eq!(sf.handle_escape("Enter"), 0);
        assert_eq!(dom.style(modal, "display"), None);
    }

    #[test]
    fn escape_without_modals_is_noop() {
        let (_dom, sf) = storefront();
        assert_eq!(sf.handle_escape("Escape"), 0);
    }

    #[test]
    fn enter_and_space_trigger_click() {
        let (dom, sf) = storefront();
        let card = dom.add(dom.body_id(), "div", &[("role", "button"), ("tabindex", "0")]);
        let clicks = Rc::new(Cell::new(0));
        {
            let clicks = Rc::clone(&clicks);
            dom.on_click(&card, Box::new(move || clicks.set(clicks.get() + 1)));
        }

        assert!(sf.handle_keyboard_navigation("Enter", &card));
        assert!(sf.handle_keyboard_navigation(" ", &card));
        assert!(!sf.handle_keyboard_navigation("Tab", &card));
        assert_eq!(clicks.get(), 2);
    }

    #[test]
    fn destructive_action_follows_user_answer() {
        let (dom, sf) = storefront();
        dom.answer_confirm(false);
        assert!(!sf.confirm_destructive());
        dom.answer_confirm(true);
        assert!(sf.confirm_destructive());
        assert_eq!(
            dom.prompts(),
            vec![StorefrontConfig::default().messages.confirm_delete; 2]
        );
    }

    #[test]
    fn mobile_menu_toggles_open_class() {
        let (dom, sf) = storefront();
        let nav = dom.add(dom.body_id(), "ul", &[("class", "navbar-nav")]);

        assert!(sf.toggle_mobile_menu());
        assert!(dom.has_class(nav, MOBILE_OPEN_CLASS));
        assert!(!sf.toggle_mobile_menu());
        assert!(!dom.has_class(nav, MOBILE_OPEN_CLASS));
        assert!(dom.has_class(nav, "navbar-nav"));
    }

    #[test]
    fn mobile_menu_without_nav_is_noop() {
        let (_dom, sf) = storefront();
        assert!(!sf.toggle_mobile_menu());
    }
}
