/*

    Declare generic data structs needed to parse JSON.

    - SingleOrVec: a field given either as one object or as an array

*/

use serde::Deserialize;

// To handle JSON file having a single <object>
// or an array of <object>s
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum SingleOrVec<T> {
    Empty,
    Single(T),
    Multiple(Vec<T>),
}

impl<T> SingleOrVec<T> {
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            SingleOrVec::Empty => Default::default(),
            SingleOrVec::Single(t) => std::slice::from_ref(t).iter(),
            SingleOrVec::Multiple(vec) => vec.iter(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T> Default for SingleOrVec<T> {
    fn default() -> Self {
        SingleOrVec::Empty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize, Default)]
    #[serde(default)]
    struct Holder {
        items: SingleOrVec<u32>,
    }

    #[test]
    fn test_single_and_multiple() {
        let h: Holder = serde_json::from_str(r#"{"items": 4}"#).unwrap();
        assert_eq!(h.items.iter().copied().collect::<Vec<_>>(), vec![4]);

        let h: Holder = serde_json::from_str(r#"{"items": [1, 2, 3]}"#).unwrap();
        assert_eq!(h.items.len(), 3);
        assert_eq!(h.items.iter().sum::<u32>(), 6);
    }

    #[test]
    fn test_missing_is_empty() {
        let h: Holder = serde_json::from_str("{}").unwrap();
        assert!(h.items.is_empty());
    }
}
