//! Core trait definitions shared by the ddm crates.

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}

/// A type that carries a human-readable origin (file path, `<memory>`, ...).
pub trait Annotated {
    /// A human-readable name or identifier.
    fn name(&self) -> &str;
}
