//! Cortical-areas legend shown beside the model

use plenamente_core::{Color, ColorParseError};
use serde::{Deserialize, Serialize};

/// Heading displayed above the legend entries
pub const LEGEND_TITLE: &str = "Áreas Corticais";

/// One colored area of the cortex and what it does
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendEntry {
    /// Area name with its color in parentheses, e.g. "Frontal (Ciano)"
    pub name: String,
    /// Swatch color as a CSS hex string
    pub color: String,
    pub description: String,
}

impl LegendEntry {
    pub fn new(
        name: impl Into<String>,
        color: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            description: description.into(),
        }
    }

    /// Parsed swatch color
    pub fn swatch(&self) -> Result<Color, ColorParseError> {
        Color::parse(&self.color)
    }
}

/// The four cortical lobes as painted on the brain model.
pub fn default_legend() -> Vec<LegendEntry> {
    vec![
        LegendEntry::new(
            "Frontal (Ciano)",
            "#34A69E",
            "Controle das outras áreas corticais, planejamento, tomada de decisão e movimentos voluntários.",
        ),
        LegendEntry::new(
            "Parietal (Amarelo)",
            "#E0DD40",
            "Associação entre múltiplos inputs sensoriais, percepção tátil e integração sensorial.",
        ),
        LegendEntry::new(
            "Occipital (Vermelho)",
            "#C32B2A",
            "Processamento das informações visuais e percepção da visão.",
        ),
        LegendEntry::new(
            "Temporal (Verde)",
            "#34B638",
            "Processamento auditivo, memória e compreensão da linguagem.",
        ),
    ]
}
