//! Required-field guard run on form submission.

use sf_api_types::Severity;
use tracing::debug;

use crate::{Dom, Storefront};

const INVALID_BORDER: &str = "#e74c3c";
const VALID_BORDER: &str = "#bdc3c7";

impl<D: Dom> Storefront<D> {
    /// Check every required field of `form`. Blank fields (after trimming)
    /// get a red border, the others get their neutral border back. Returns
    /// `false`, after showing an error alert, when submission must be blocked.
    pub fn validate_form(&self, form: &D::Element) -> bool {
        let dom = &self.dom;
        let mut missing = 0usize;
        for field in dom.query_all_within(form, &self.config.selectors.required_field) {
            let filled = !dom.value(&field).trim().is_empty();
            dom.set_style(
                &field,
                "border-color",
                if filled { VALID_BORDER } else { INVALID_BORDER },
            );
            if !filled {
                missing += 1;
            }
        }

        if missing == 0 {
            return true;
        }
        debug!(missing, "form submission blocked");
        self.report(&self.config.messages.required_fields, Severity::Error);
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StorefrontConfig;
    use crate::testing::{MockDom, NodeId};

    struct Fixture {
        dom: MockDom,
        sf: Storefront<MockDom>,
        form: NodeId,
        name: NodeId,
        email: NodeId,
        note: NodeId,
    }

    fn fixture() -> Fixture {
        let dom = MockDom::default();
        let container = dom.add(dom.body_id(), "div", &[("class", "container")]);
        let form = dom.add(container, "form", &[]);
        let name = dom.add(form, "input", &[("name", "name"), ("required", "")]);
        let email = dom.add(form, "input", &[("name", "email"), ("required", "")]);
        let note = dom.add(form, "textarea", &[("name", "note")]);
        let sf = Storefront::new(dom.clone(), StorefrontConfig::default());
        Fixture {
            dom,
            sf,
            form,
            name,
            email,
            note,
        }
    }

    #[test]
    fn complete_form_passes_without_alert() {
        let f = fixture();
        f.dom.set_value(f.name, "Ana");
        f.dom.set_value(f.email, "ana@example.com");

        assert!(f.sf.validate_form(&f.form));
        assert!(f.dom.query(".alert").is_none());
        assert_eq!(f.dom.style(f.name, "border-color").as_deref(), Some(VALID_BORDER));
    }

    #[test]
    fn whitespace_only_field_blocks_submission() {
        let f = fixture();
        f.dom.set_value(f.name, "Ana");
        f.dom.set_value(f.email, "   ");

        assert!(!f.sf.validate_form(&f.form));
        assert_eq!(f.dom.style(f.email, "border-color").as_deref(), Some(INVALID_BORDER));
        assert_eq!(f.dom.style(f.name, "border-color").as_deref(), Some(VALID_BORDER));
        let alert = f.dom.query(".alert-error").expect("error alert");
        assert!(
            f.dom
                .text_content(alert)
                .contains(&StorefrontConfig::default().messages.required_fields)
        );
    }

    #[test]
    fn every_blank_field_is_marked() {
        let f = fixture();
        assert!(!f.sf.validate_form(&f.form));
        assert_eq!(f.dom.style(f.name, "border-color").as_deref(), Some(INVALID_BORDER));
        assert_eq!(f.dom.style(f.email, "border-color").as_deref(), Some(INVALID_BORDER));
        assert_eq!(f.dom.style(f.note, "border-color"), None);
    }

    #[test]
    fn fixing_a_field_clears_its_error_marker() {
        let f = fixture();
        assert!(!f.sf.validate_form(&f.form));

        f.dom.set_value(f.name, "Ana");
        f.dom.set_value(f.email, "ana@example.com");
        assert!(f.sf.validate_form(&f.form));
        assert_eq!(f.dom.style(f.email, "border-color").as_deref(), Some(VALID_BORDER));
    }
}
