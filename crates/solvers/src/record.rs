/// Common view over the per-method iteration records.
pub trait Record {
    /// Iteration index, starting at 1.
    fn iter(&self) -> usize;

    /// Error magnitude used by the method's stopping test for this step.
    fn error(&self) -> f64;

    /// Root estimate produced by this step.
    fn estimate(&self) -> f64;
}
