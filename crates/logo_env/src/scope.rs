//! A single dynamic scope frame: variable name to `Value`, or the unbound
//! sentinel `LOCAL` installs before a later `MAKE`/`LOCALMAKE` fills it in.

use logo_ir::Value;
use rustc_hash::FxHashMap;

#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Option<Value>>,
}

impl Scope {
    #[must_use]
    pub fn new() -> Self {
        Scope {
            bindings: FxHashMap::default(),
        }
    }

    /// `true` iff `name` has a binding (bound or not) in this frame alone.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Option<Value>> {
        self.bindings.get(name)
    }

    pub fn set_bound(&mut self, name: &str, value: Value) {
        self.bindings.insert(name.to_string(), Some(value));
    }

    pub fn set_unbound(&mut self, name: &str) {
        self.bindings.insert(name.to_string(), None);
    }

    /// Every bound (non-`LOCAL`-pending) name/value pair in this frame, for
    /// `SAVE`'s `; VARIABLES` section.
    pub fn bound_entries(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.bindings
            .iter()
            .filter_map(|(name, value)| value.as_ref().map(|v| (name.as_str(), v)))
    }
}
