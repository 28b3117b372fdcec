use crate::domain::MotionResult;

pub trait MotionCalculator {
    /// Rebuilds every derived output from the current inputs.
    fn calculate(&mut self) -> MotionResult<()>;

    fn is_stale(&self) -> bool;
}

pub trait LazyMotion {
    fn ensure_calculated(&mut self) -> MotionResult<()>;
}

impl<T> LazyMotion for T
where
    T: MotionCalculator,
{
    fn ensure_calculated(&mut self) -> MotionResult<()> {
        if self.is_stale() {
            self.calculate()
        } else {
            Ok(())
        }
    }
}
