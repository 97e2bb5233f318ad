use crate::primitive::Primitive;

/// Destination for primitives produced by the meshers.
///
/// `emit` returns `false` once the sink refuses further output; meshers stop their pass as soon
/// as that happens.
pub trait PrimitiveSink {
    fn emit(&mut self, p: Primitive) -> bool;
    fn is_full(&self) -> bool;
}

// Unbounded sink, handy for running a single pass in isolation.
impl PrimitiveSink for Vec<Primitive> {
    #[inline]
    fn emit(&mut self, p: Primitive) -> bool {
        self.push(p);
        true
    }

    #[inline]
    fn is_full(&self) -> bool {
        false
    }
}

/// Hard cap on the number of primitives one chunk pass may produce.
///
/// Shared by every mesher of a chunk, so the cap applies to the combined output. Truncation is
/// silent and deterministic: the first `max` primitives in pass order are kept.
#[derive(Debug)]
pub struct BudgetController {
    max: usize,
    out: Vec<Primitive>,
    exhausted: bool,
}

impl BudgetController {
    pub fn new(max: usize) -> Self {
        Self {
            max,
            out: Vec::with_capacity(max.min(1024)),
            exhausted: false,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.out.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.out.is_empty()
    }

    /// True once a primitive has been refused.
    #[inline]
    pub fn exhausted(&self) -> bool {
        self.exhausted
    }

    pub fn into_primitives(self) -> Vec<Primitive> {
        self.out
    }
}

impl PrimitiveSink for BudgetController {
    #[inline]
    fn emit(&mut self, p: Primitive) -> bool {
        if self.out.len() >= self.max {
            if !self.exhausted {
                self.exhausted = true;
                log::debug!(
                    target: "mesh",
                    "primitive budget of {} reached; truncating chunk output",
                    self.max
                );
            }
            return false;
        }
        self.out.push(p);
        true
    }

    #[inline]
    fn is_full(&self) -> bool {
        self.out.len() >= self.max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitive::PrimitiveKind;
    use strata_geom::Vec3;

    fn unit() -> Primitive {
        Primitive::new(PrimitiveKind::Box, Vec3::ZERO, Vec3::ONE, 1)
    }

    #[test]
    fn refuses_past_the_cap() {
        let mut b = BudgetController::new(2);
        assert!(b.emit(unit()));
        assert!(!b.is_full());
        assert!(b.emit(unit()));
        assert!(b.is_full());
        assert!(!b.exhausted());
        assert!(!b.emit(unit()));
        assert!(b.exhausted());
        assert_eq!(b.len(), 2);
    }

    #[test]
    fn zero_budget_emits_nothing() {
        let mut b = BudgetController::new(0);
        assert!(b.is_full());
        assert!(!b.emit(unit()));
        assert!(b.is_empty());
        assert!(b.into_primitives().is_empty());
    }
}
