/// A resource that is loaded at most once, on first use.
#[derive(Debug, Default)]
pub enum Slot<T> {
    #[default]
    Unloaded,
    Loaded(T),
}

impl<T> Slot<T> {
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Return the loaded value, running `load` first if still unloaded.
    /// A failed load leaves the slot unloaded.
    pub fn get_or_try_load<E>(&mut self, load: impl FnOnce() -> Result<T, E>) -> Result<&mut T, E> {
        if let Self::Unloaded = self {
            *self = Self::Loaded(load()?);
        }
        match self {
            Self::Loaded(value) => Ok(value),
            Self::Unloaded => unreachable!("slot populated above"),
        }
    }
}
