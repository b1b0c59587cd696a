/// How a phase obtained one artifact value from model output.
///
/// `Parsed` is the normal path. `Fallback` means the output was unusable and
/// a degraded value was persisted instead, so the run can continue.
/// `Dropped` means nothing was persisted for this item.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<T> {
    Parsed(T),
    Fallback(T),
    Dropped { reason: String },
}

impl<T> Outcome<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Parsed(v) | Self::Fallback(v) => Some(v),
            Self::Dropped { .. } => None,
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Parsed(v) | Self::Fallback(v) => Some(v),
            Self::Dropped { .. } => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback(_))
    }
}
