use indexmap::IndexMap;

/// Freshly fetched remote playlist state: id -> title, in fetch order.
///
/// The iteration order is the insertion order of the fetch, which the
/// reconciliation engine relies on when ordering newly added items.
/// Duplicate ids are last-write-wins on the title; the position of the
/// first insertion is kept.
#[derive(Debug, Clone, Default)]
pub struct RemoteItems {
    items: IndexMap<String, String>,
}

impl RemoteItems {
    /// Create an empty remote item set
    pub fn new() -> Self {
        Self {
            items: IndexMap::new(),
        }
    }

    /// Insert an item; an existing id keeps its position, title is replaced
    pub fn insert(&mut self, id: impl Into<String>, title: impl Into<String>) {
        self.items.insert(id.into(), title.into());
    }

    /// Look up a title by id
    pub fn get(&self, id: &str) -> Option<&str> {
        self.items.get(id).map(String::as_str)
    }

    /// Membership test
    pub fn contains(&self, id: &str) -> bool {
        self.items.contains_key(id)
    }

    /// Iterate `(id, title)` pairs in fetch order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of distinct items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True if the fetch returned no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RemoteItems {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut items = RemoteItems::new();
        for (id, title) in iter {
            items.insert(id, title);
        }
        items
    }
}
