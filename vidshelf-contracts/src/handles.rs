use uuid::Uuid;

/// Opaque reference to the scrolling ancestor that roots visibility
/// observations.
///
/// Cloning shares the same viewport; two handles are equal only when they
/// refer to the same viewport.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ViewportHandle(Uuid);

impl ViewportHandle {
    pub fn new() -> Self {
        ViewportHandle(Uuid::now_v7())
    }
}

impl Default for ViewportHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ViewportHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "viewport:{}", self.0)
    }
}

/// Opaque reference to the element that wraps a single media surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContainerHandle(Uuid);

impl ContainerHandle {
    pub fn new() -> Self {
        ContainerHandle(Uuid::now_v7())
    }
}

impl Default for ContainerHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ContainerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "container:{}", self.0)
    }
}
