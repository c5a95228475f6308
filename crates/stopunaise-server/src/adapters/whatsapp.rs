//! WhatsApp Handoff
//!
//! Builds `wa.me` deep links that open a chat prefilled with the order summary.

use stopunaise::MessagingHandoff;

/// WhatsApp implementation of MessagingHandoff
pub struct WhatsAppHandoff {
    phone: String,
}

impl WhatsAppHandoff {
    pub fn new(phone: impl Into<String>) -> Self {
        let phone: String = phone.into();
        Self {
            phone: phone.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }
}

impl MessagingHandoff for WhatsAppHandoff {
    fn link(&self, text: &str) -> String {
        format!("https://wa.me/{}?text={}", self.phone, urlencoding::encode(text))
    }

    fn name(&self) -> &str {
        "whatsapp"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_encodes_text() {
        let handoff = WhatsAppHandoff::new("+225 05 56 52 06 04");
        let link = handoff.link("TOTAL: 12,500 CFA\nMerci !");

        assert_eq!(
            link,
            "https://wa.me/+2250556520604?text=TOTAL%3A%2012%2C500%20CFA%0AMerci%20%21"
        );
    }

    #[test]
    fn test_link_encodes_unicode() {
        let link = WhatsAppHandoff::new("+2250556520604").link("🛒 Adjamé");
        assert_eq!(
            link,
            "https://wa.me/+2250556520604?text=%F0%9F%9B%92%20Adjam%C3%A9"
        );
    }
}
