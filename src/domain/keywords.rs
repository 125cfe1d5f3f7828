//! Keyword sets used to classify free-text step names, parameters and equipment.
//!
//! A keyword containing an uppercase letter (for example `pH`) is matched
//! case-sensitively; every other keyword is matched case-insensitively.
//! Matching is always by substring.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    /// Parameters worth +1 risk point.
    ControlParameter,
    /// Parameters worth +3 risk points.
    SterilityParameter,
    /// Parameters worth +2 risk points.
    QualityParameter,
    /// Equipment worth +2 risk points.
    HighRiskEquipment,
    /// Equipment worth +1.5 risk points.
    MediumRiskEquipment,
    /// Step names whose risk score is amplified.
    CriticalOperation,
    AsepticOperation,
    Biosafety,
    Temperature,
    Pressure,
    Acidity,
    Duration,
    /// Step names that require a sterility assurance parameter.
    SterileStep,
    SterilityAssurance,
    /// Step names that require a pressure or flow parameter.
    SeparationStep,
    PressureOrFlow,
    ComplexityCriticalParameter,
    ComplexityKeyParameter,
    ComplexityHighEquipment,
    ComplexityMediumEquipment,
}

impl KeywordCategory {
    pub const ALL: [KeywordCategory; 20] = [
        KeywordCategory::ControlParameter,
        KeywordCategory::SterilityParameter,
        KeywordCategory::QualityParameter,
        KeywordCategory::HighRiskEquipment,
        KeywordCategory::MediumRiskEquipment,
        KeywordCategory::CriticalOperation,
        KeywordCategory::AsepticOperation,
        KeywordCategory::Biosafety,
        KeywordCategory::Temperature,
        KeywordCategory::Pressure,
        KeywordCategory::Acidity,
        KeywordCategory::Duration,
        KeywordCategory::SterileStep,
        KeywordCategory::SterilityAssurance,
        KeywordCategory::SeparationStep,
        KeywordCategory::PressureOrFlow,
        KeywordCategory::ComplexityCriticalParameter,
        KeywordCategory::ComplexityKeyParameter,
        KeywordCategory::ComplexityHighEquipment,
        KeywordCategory::ComplexityMediumEquipment,
    ];

    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            KeywordCategory::ControlParameter => {
                &["temperature", "pressure", "pH", "acidity", "time", "duration"]
            }
            KeywordCategory::SterilityParameter => {
                &["steril", "aseptic", "viral", "virus", "endotoxin"]
            }
            KeywordCategory::QualityParameter => &["content", "purity", "impurit", "assay"],
            KeywordCategory::HighRiskEquipment => {
                &["bioreactor", "chromatograph", "lyophili", "freeze dryer", "sterili", "autoclave"]
            }
            KeywordCategory::MediumRiskEquipment => &["fill", "filt", "centrifug"],
            KeywordCategory::CriticalOperation => {
                &["steril", "aseptic", "fill", "chromatograph", "viral", "virus"]
            }
            KeywordCategory::AsepticOperation => &["steril", "aseptic"],
            KeywordCategory::Biosafety => &["viral", "virus", "biolog", "biosafety"],
            KeywordCategory::Temperature => &["temperature"],
            KeywordCategory::Pressure => &["pressure"],
            KeywordCategory::Acidity => &["pH", "acidity"],
            KeywordCategory::Duration => &["time", "duration"],
            KeywordCategory::SterileStep => &["steril", "aseptic"],
            KeywordCategory::SterilityAssurance => &["steril", "aseptic"],
            KeywordCategory::SeparationStep => &["filt", "chromatograph", "purif"],
            KeywordCategory::PressureOrFlow => &["pressure", "flow"],
            KeywordCategory::ComplexityCriticalParameter => {
                &["steril", "aseptic", "viral", "virus", "endotoxin", "critical"]
            }
            KeywordCategory::ComplexityKeyParameter => {
                &["temperature", "pH", "pressure", "content"]
            }
            KeywordCategory::ComplexityHighEquipment => {
                &["bioreactor", "chromatograph", "lyophili"]
            }
            KeywordCategory::ComplexityMediumEquipment => &["fill", "sterili", "filt"],
        }
    }

    pub fn matches(self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.keywords()
            .iter()
            .any(|keyword| keyword_matches(text, &lowered, keyword))
    }

    pub fn matches_any<S: AsRef<str>>(self, texts: &[S]) -> bool {
        texts.iter().any(|text| self.matches(text.as_ref()))
    }
}

fn keyword_matches(text: &str, lowered: &str, keyword: &str) -> bool {
    if keyword.chars().any(|c| c.is_uppercase()) {
        text.contains(keyword)
    } else {
        lowered.contains(keyword)
    }
}
