use std::cmp::Ordering;

/// A key-value pair ordered by its key alone.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entry<T, U> {
    pub key: T,
    pub value: U,
}

impl<T, U> Entry<T, U> {
    pub fn new(key: T, value: U) -> Self {
        Entry { key, value }
    }

    pub fn into_pair(self) -> (T, U) {
        let Entry { key, value } = self;
        (key, value)
    }
}

impl<T, U> Ord for Entry<T, U>
where T: Ord
{
    fn cmp(&self, other: &Entry<T, U>) -> Ordering {
        self.key.cmp(&other.key)
    }
}

impl<T, U> PartialOrd for Entry<T, U>
where T: Ord
{
    fn partial_cmp(&self, other: &Entry<T, U>) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T, U> PartialEq for Entry<T, U>
where T: Ord
{
    fn eq(&self, other: &Entry<T, U>) -> bool {
        self.key == other.key
    }
}

impl<T, U> Eq for Entry<T, U> where T: Ord {}

#[cfg(test)]
mod tests {
    use super::Entry;
    use serde_test::{assert_tokens, Token};

    #[test]
    fn test_ordered_by_key_only() {
        let lhs = Entry::new(1, 'a');
        let rhs = Entry::new(1, 'b');
        assert_eq!(lhs, rhs);
        assert!(Entry::new(1, 'b') < Entry::new(2, 'a'));
    }

    #[test]
    fn test_into_pair() {
        assert_eq!(Entry::new(1, 2).into_pair(), (1, 2));
    }

    #[test]
    fn test_serde() {
        let entry = Entry::new(1u32, 2u32);
        assert_tokens(&entry, &[
            Token::Struct {
                name: "Entry",
                len: 2,
            },
            Token::Str("key"),
            Token::U32(1),
            Token::Str("value"),
            Token::U32(2),
            Token::StructEnd,
        ]);
    }
}
