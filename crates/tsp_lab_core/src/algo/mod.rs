pub(crate) mod held_karp;
pub(crate) mod hybrid;
pub(crate) mod mst;
