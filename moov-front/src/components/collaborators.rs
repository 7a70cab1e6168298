//! Inputs for the rendering collaborators a line card embeds.
//!
//! The mode icon and the ridership chart are drawn by external components;
//! a line card only decides what to pass them.

use serde::Serialize;

/// Inputs for the transport-mode icon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransportImage {
    /// Line identifier the icon is chosen by.
    pub transport: String,
    pub network: String,
    pub width: &'static str,
    pub height: &'static str,
    pub top: &'static str,
    pub webkit_transform: &'static str,
}

impl TransportImage {
    /// Icon sized for a line card.
    pub fn for_card(transport: &str, network: &str) -> Self {
        Self {
            transport: transport.to_string(),
            network: network.to_string(),
            width: "30px",
            height: "30px",
            top: "50%",
            webkit_transform: "translate(0%, 50%)",
        }
    }

    /// Inline style for the icon element.
    pub fn style(&self) -> String {
        format!(
            "width:{};height:{};top:{};-webkit-transform:{}",
            self.width, self.height, self.top, self.webkit_transform
        )
    }
}

/// Inputs for the ridership chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FreqChart {
    pub station: String,
    pub network: String,
    pub line: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_icon_geometry() {
        let icon = TransportImage::for_card("C1", "Rennes");
        assert_eq!(icon.transport, "C1");
        assert_eq!(icon.network, "Rennes");
        assert_eq!(
            icon.style(),
            "width:30px;height:30px;top:50%;-webkit-transform:translate(0%, 50%)"
        );
    }
}
