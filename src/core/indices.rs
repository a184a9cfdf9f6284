use hashbrown::HashMap;

/// Key to first insertion position. Built first-wins so duplicate keys
/// resolve to the earliest record, matching storage order.
pub type FirstMatchIndex = HashMap<String, usize>;
