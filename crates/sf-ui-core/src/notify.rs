//! Alert and notification banners.
//!
//! Alerts sit at the top of the page container and can be closed by hand;
//! notifications float in the top-right corner and slide out before they
//! are removed. Both remove themselves on a timer.

use sf_api_types::Severity;
use tracing::{debug, warn};

use crate::error::DomError;
use crate::{Dom, Storefront};

pub const STYLE_ELEMENT_ID: &str = "storefront-styles";

const ANIMATION_CSS: &str = r#"
@keyframes slideIn {
    from { transform: translateX(100%); opacity: 0; }
    to { transform: translateX(0); opacity: 1; }
}

@keyframes slideOut {
    from { transform: translateX(0); opacity: 1; }
    to { transform: translateX(100%); opacity: 0; }
}

.mobile-open {
    display: flex !important;
    flex-direction: column;
    position: absolute;
    top: 100%;
    left: 0;
    right: 0;
    background: #2c3e50;
    padding: 1rem;
}
"#;

fn notification_background(severity: Severity) -> &'static str {
    match severity {
        Severity::Success => "#27ae60",
        Severity::Error => "#e74c3c",
        Severity::Warning => "#f39c12",
        Severity::Info => "#3498db",
    }
}

impl<D: Dom> Storefront<D> {
    /// Insert an alert at the top of the page container. It is removed after
    /// `timing.alert_ms`, or earlier through its close button.
    pub fn show_alert(&self, message: &str, severity: Severity) -> Result<D::Element, DomError> {
        let dom = &self.dom;
        let selector = &self.config.selectors.alert_container;
        let container = dom
            .query(selector)
            .ok_or_else(|| DomError::Missing(selector.clone()))?;

        let alert = dom.create_element("div")?;
        dom.set_class_name(&alert, &format!("alert alert-{severity}"));
        dom.set_attribute(&alert, "role", "alert");

        let text = dom.create_element("span")?;
        dom.set_class_name(&text, "alert-message");
        dom.set_text(&text, message);
        dom.append_child(&alert, &text)?;

        let close = dom.create_element("button")?;
        dom.set_class_name(&close, "alert-close");
        dom.set_attribute(&close, "type", "button");
        dom.set_attribute(&close, "aria-label", "Close");
        dom.set_text(&close, "\u{00d7}");
        dom.append_child(&alert, &close)?;
        {
            let dom2 = dom.clone();
            let alert2 = alert.clone();
            dom.on_click(&close, Box::new(move || dom2.remove(&alert2)));
        }

        dom.prepend_child(&container, &alert)?;
        debug!(%severity, "alert shown");

        let dom2 = dom.clone();
        let alert2 = alert.clone();
        dom.set_timeout(
            self.config.timing.alert_ms,
            Box::new(move || dom2.remove(&alert2)),
        );
        Ok(alert)
    }

    /// Float a notification in the corner for `duration_ms` (default
    /// `timing.notification_ms`), then play the exit animation and remove it.
    pub fn show_notification(
        &self,
        message: &str,
        severity: Severity,
        duration_ms: Option<u32>,
    ) -> Result<D::Element, DomError> {
        let dom = &self.dom;
        let body = dom.body().ok_or_else(|| DomError::Missing("body".to_owned()))?;

        let note = dom.create_element("div")?;
        dom.set_class_name(&note, &format!("notification notification-{severity}"));
        dom.set_text(&note, message);
        for (property, value) in [
            ("position", "fixed"),
            ("top", "20px"),
            ("right", "20px"),
            ("padding", "1rem 1.5rem"),
            ("background", notification_background(severity)),
            ("color", "white"),
            ("border-radius", "4px"),
            ("box-shadow", "0 2px 10px rgba(0,0,0,0.2)"),
            ("z-index", "1000"),
            ("animation", "slideIn 0.3s ease"),
        ] {
            dom.set_style(&note, property, value);
        }
        dom.append_child(&body, &note)?;

        let duration = duration_ms.unwrap_or(self.config.timing.notification_ms);
        let exit = self.config.timing.notification_exit_ms;
        let dom2 = dom.clone();
        let note2 = note.clone();
        dom.set_timeout(
            duration,
            Box::new(move || {
                dom2.set_style(&note2, "animation", "slideOut 0.3s ease");
                let dom3 = dom2.clone();
                dom2.set_timeout(exit, Box::new(move || dom3.remove(&note2)));
            }),
        );
        debug!(%severity, duration, "notification shown");
        Ok(note)
    }

    /// Add the banner animations and the mobile menu rule to `<head>`.
    /// Does nothing if they are already there.
    pub fn install_styles(&self) -> Result<(), DomError> {
        let dom = &self.dom;
        if dom.by_id(STYLE_ELEMENT_ID).is_some() {
            return Ok(());
        }
        let head = dom.head().ok_or_else(|| DomError::Missing("head".to_owned()))?;
        let style = dom.create_element("style")?;
        dom.set_attribute(&style, "id", STYLE_ELEMENT_ID);
        dom.set_text(&style, ANIMATION_CSS);
        dom.append_child(&head, &style)
    }

    /// Alert used for outcomes the user must see. A page without an alert
    /// container falls back to a floating notification.
    pub(crate) fn report(&self, message: &str, severity: Severity) {
        if let Err(err) = self.show_alert(message, severity) {
            warn!(error = %err, "alert container unavailable, using notification");
            if let Err(err) = self.show_notification(message, severity, None) {
                warn!(error = %err, message, "could not display banner");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorefrontConfig;
    use crate::testing::MockDom;

    fn page() -> (MockDom, Storefront<MockDom>) {
        let dom = MockDom::default();
        dom.add(dom.body_id(), "div", &[("class", "container")]);
        let sf = Storefront::new(dom.clone(), StorefrontConfig::default());
        (dom, sf)
    }

    #[test]
    fn alert_is_first_child_of_container() -> anyhow::Result<()> {
        let (dom, sf) = page();
        let container = dom.query(".container").unwrap();
        dom.add(container, "h1", &[]);

        let alert = sf.show_alert("Saved", Severity::Success)?;

        assert_eq!(dom.children(container)[0], alert);
        assert_eq!(dom.tag(alert), "div");
        assert_eq!(dom.class_name(alert), "alert alert-success");
        assert_eq!(dom.attribute(alert, "role").as_deref(), Some("alert"));
        let text = dom.query(".alert-message").unwrap();
        assert_eq!(dom.text_content(text), "Saved");
        Ok(())
    }

    #[test]
    fn alert_expires_after_configured_delay() -> anyhow::Result<()> {
        let (dom, sf) = page();
        let alert = sf.show_alert("Hello", Severity::Info)?;

        dom.advance(4_999);
        assert!(dom.is_attached(alert));
        dom.advance(1);
        assert!(!dom.is_attached(alert));
        Ok(())
    }

    #[test]
    fn close_button_dismisses_early_and_timer_is_harmless() -> anyhow::Result<()> {
        let (dom, sf) = page();
        let alert = sf.show_alert("Hello", Severity::Info)?;
        let close = dom.query(".alert-close").unwrap();
        assert_eq!(dom.tag(close), "button");
        assert_eq!(dom.attribute(close, "type").as_deref(), Some("button"));

        dom.click(&close);
        assert!(!dom.is_attached(alert));

        dom.advance(10_000);
        assert!(!dom.is_attached(alert));
        Ok(())
    }

    #[test]
    fn alert_without_container_is_an_error() {
        let dom = MockDom::default();
        let sf = Storefront::new(dom, StorefrontConfig::default());
        let err = sf.show_alert("x", Severity::Error).unwrap_err();
        assert_eq!(err, DomError::Missing(".container".to_owned()));
    }

    #[test]
    fn report_falls_back_to_notification() {
        let dom = MockDom::default();
        let sf = Storefront::new(dom.clone(), StorefrontConfig::default());
        sf.report("Connection error", Severity::Error);
        assert!(dom.query(".notification-error").is_some());
    }

    #[test]
    fn notification_lives_for_duration_plus_exit() -> anyhow::Result<()> {
        let (dom, sf) = page();
        let note = sf.show_notification("Added to cart", Severity::Success, Some(3_000))?;

        assert!(dom.is_attached(note));
        assert_eq!(dom.style(note, "background").as_deref(), Some("#27ae60"));
        assert_eq!(dom.style(note, "animation").as_deref(), Some("slideIn 0.3s ease"));

        dom.advance(3_000);
        assert!(dom.is_attached(note));
        assert_eq!(dom.style(note, "animation").as_deref(), Some("slideOut 0.3s ease"));

        dom.advance(300);
        assert!(!dom.is_attached(note));
        Ok(())
    }

    #[test]
    fn notification_defaults_to_configured_duration() -> anyhow::Result<()> {
        let (dom, sf) = page();
        let note = sf.show_notification("Hi", Severity::Info, None)?;
        assert_eq!(dom.style(note, "background").as_deref(), Some("#3498db"));
        dom.advance(3_299);
        assert!(dom.is_attached(note));
        dom.advance(1);
        assert!(!dom.is_attached(note));
        Ok(())
    }

    #[test]
    fn styles_are_installed_once() -> anyhow::Result<()> {
        let (dom, sf) = page();
        sf.install_styles()?;
        sf.install_styles()?;
        let head = dom.head().unwrap();
        let styles = dom.query_all_within(&head, "style");
        assert_eq!(styles.len(), 1);
        assert!(dom.text_content(styles[0]).contains("@keyframes slideOut"));
        Ok(())
    }
}
