/// Converts external requests into instances, filling in what a request leaves unspecified.
#[derive(Clone, Debug, Copy)]
pub struct Importer {
    /// Whether items may be rotated when a request does not say
    pub allow_rotation: bool,
}

impl Importer {
    pub fn new(allow_rotation: bool) -> Importer {
        Importer { allow_rotation }
    }
}

impl Default for Importer {
    fn default() -> Self {
        Importer::new(true)
    }
}
