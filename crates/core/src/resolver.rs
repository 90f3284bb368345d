//! Locates the keyframes bracketing a frame index.

use lapse_model::Keyframe;

/// How a frame relates to the keyframes around it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bracket<'a> {
    /// Strictly between two keyframes: blend them.
    Between {
        prev: &'a Keyframe,
        next: &'a Keyframe,
    },
    /// The frame is this keyframe's own frame.
    At(&'a Keyframe),
    /// After the last keyframe: hold its values.
    After(&'a Keyframe),
    /// Before the first keyframe: hold its values.
    Before(&'a Keyframe),
    /// There are no keyframes at all.
    Unresolved,
}

impl<'a> Bracket<'a> {
    /// The keyframe whose values are held, when not blending.
    pub fn held(&self) -> Option<&'a Keyframe> {
        match *self {
            Bracket::At(kf) | Bracket::After(kf) | Bracket::Before(kf) => Some(kf),
            Bracket::Between { .. } | Bracket::Unresolved => None,
        }
    }

    /// The keyframe whose full settings a new frame should start from:
    /// the preceding one when it exists, otherwise the following one.
    pub fn template(&self) -> Option<&'a Keyframe> {
        match *self {
            Bracket::Between { prev, .. } => Some(prev),
            other => other.held(),
        }
    }
}

/// Find the bracket for `index` in `keyframes`, which must be sorted by
/// index without duplicates.
///
/// `prev` is the last keyframe at or before `index`, `next` the first at
/// or after it. A frame that coincides with a keyframe is never blended.
pub fn resolve(keyframes: &[Keyframe], index: usize) -> Bracket<'_> {
    let upto = keyframes.partition_point(|kf| kf.index <= index);
    let from = keyframes.partition_point(|kf| kf.index < index);

    let prev = upto.checked_sub(1).map(|i| &keyframes[i]);
    let next = keyframes.get(from);

    match (prev, next) {
        (Some(prev), Some(next)) if prev.index != next.index => Bracket::Between { prev, next },
        (Some(prev), Some(_)) => Bracket::At(prev),
        (Some(prev), None) => Bracket::After(prev),
        (None, Some(next)) => Bracket::Before(next),
        (None, None) => Bracket::Unresolved,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lapse_model::ExposureValues;

    fn keyframes(indices: &[usize]) -> Vec<Keyframe> {
        indices
            .iter()
            .map(|&i| Keyframe::new(i, ExposureValues::DEFAULT))
            .collect()
    }

    #[test]
    fn test_between_two_keyframes() {
        let kfs = keyframes(&[0, 4, 9]);
        match resolve(&kfs, 2) {
            Bracket::Between { prev, next } => {
                assert_eq!(prev.index, 0);
                assert_eq!(next.index, 4);
            }
            other => panic!("expected Between, got {other:?}"),
        }
        match resolve(&kfs, 7) {
            Bracket::Between { prev, next } => {
                assert_eq!((prev.index, next.index), (4, 9));
            }
            other => panic!("expected Between, got {other:?}"),
        }
    }

    #[test]
    fn test_exact_keyframe_is_held() {
        let kfs = keyframes(&[0, 4, 9]);
        assert_eq!(resolve(&kfs, 4), Bracket::At(&kfs[1]));
        assert_eq!(resolve(&kfs, 0), Bracket::At(&kfs[0]));
    }

    #[test]
    fn test_outside_keyframe_span() {
        let kfs = keyframes(&[3, 6]);
        assert_eq!(resolve(&kfs, 1), Bracket::Before(&kfs[0]));
        assert_eq!(resolve(&kfs, 12), Bracket::After(&kfs[1]));
    }

    #[test]
    fn test_no_keyframes() {
        assert_eq!(resolve(&[], 0), Bracket::Unresolved);
        assert!(Bracket::Unresolved.template().is_none());
    }

    #[test]
    fn test_template_prefers_previous() {
        let kfs = keyframes(&[2, 8]);
        assert_eq!(resolve(&kfs, 5).template().map(|k| k.index), Some(2));
        assert_eq!(resolve(&kfs, 0).template().map(|k| k.index), Some(2));
        assert_eq!(resolve(&kfs, 9).template().map(|k| k.index), Some(8));
    }
}
