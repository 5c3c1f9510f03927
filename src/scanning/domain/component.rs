/// One AI component extracted from an AI-BOM document.
///
/// Uniqueness for matching purposes is by name only; the same name may
/// appear across targets with different versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    name: String,
    kind: Option<String>,
    version: Option<String>,
    /// Source locations from the document's evidence occurrences, already
    /// rendered as `path` or `path:line` strings.
    locations: Vec<String>,
}

impl Component {
    pub fn new(name: String, kind: Option<String>, version: Option<String>) -> Self {
        Self {
            name,
            kind,
            version,
            locations: Vec::new(),
        }
    }

    pub fn with_locations(mut self, locations: Vec<String>) -> Self {
        self.locations = locations;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn locations(&self) -> &[String] {
        &self.locations
    }

    /// Whether this component is a machine-learning model.
    ///
    /// Policy checks only apply to model components.
    pub fn is_ml_model(&self) -> bool {
        self.kind() == Some("machine-learning-model")
    }
}
