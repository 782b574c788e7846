//! Parameter map for EC2 query requests.
//!
//! Every EC2 call is a flat set of `name=value` pairs. Repeated and structured
//! inputs are spread over synthesized keys with 1-based, gap-free indices, e.g.
//! `InstanceId.1`, `BlockDeviceMapping.2.Ebs.VolumeSize`. [`ParamScope`] holds
//! the helpers that produce those keys; structured inputs describe their own
//! fields by implementing [`EncodeParams`].

use std::collections::BTreeMap;
use std::fmt::Display;

/// Name of the parameter carrying the action.
pub const ACTION: &str = "Action";

/// Parameters of a single EC2 request.
///
/// Keys are kept sorted, so iteration order is stable for a given content.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Params {
    map: BTreeMap<String, String>,
}

impl Params {
    /// Create the parameter map for the named action.
    #[must_use]
    pub fn new(action: &str) -> Self {
        let mut map = BTreeMap::new();
        map.insert(ACTION.to_string(), action.to_string());
        Self { map }
    }

    /// Scope writing keys at the top level.
    pub fn root(&mut self) -> ParamScope<'_> {
        ParamScope {
            map: &mut self.map,
            prefix: String::new(),
        }
    }

    /// Insert or replace a single parameter.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.map.insert(key.into(), value.into());
    }

    /// Look up a parameter value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.map.get(key).map(String::as_str)
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.map.contains_key(key)
    }

    /// Iterate over the pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.map.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Encode as a URL query string, one pair per key.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish()
    }

    /// Parse a URL query string back into a parameter map.
    ///
    /// A key repeated in the input keeps its last value.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let map = url::form_urlencoded::parse(query.as_bytes())
            .into_owned()
            .collect();
        Self { map }
    }

    /// Consume into the underlying map.
    #[must_use]
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.map
    }
}

/// A structured input that knows how to spread itself over request keys.
///
/// Implementations write their fields relative to the scope they are given,
/// which already carries the `Label.N.` prefix of the item.
pub trait EncodeParams {
    /// Write this value's fields into `scope`.
    fn encode_params(&self, scope: &mut ParamScope<'_>);
}

/// A view over a [`Params`] map that writes keys under a fixed prefix.
#[derive(Debug)]
pub struct ParamScope<'a> {
    map: &'a mut BTreeMap<String, String>,
    prefix: String,
}

impl ParamScope<'_> {
    fn key(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    /// Set a required parameter.
    pub fn set<T>(&mut self, name: &str, value: T)
    where
        T: Display,
    {
        let key = self.key(name);
        self.map.insert(key, value.to_string());
    }

    /// Set a parameter when the value is present and renders non-empty.
    pub fn set_opt<T>(&mut self, name: &str, value: Option<T>)
    where
        T: Display,
    {
        if let Some(value) = value {
            self.set_non_empty(name, &value.to_string());
        }
    }

    /// Set a string parameter unless it is empty.
    pub fn set_non_empty(&mut self, name: &str, value: &str) {
        if !value.is_empty() {
            self.set(name, value);
        }
    }

    /// Set a numeric parameter unless it is zero.
    pub fn set_non_zero(&mut self, name: &str, value: i64) {
        if value != 0 {
            self.set(name, value);
        }
    }

    /// Set `name=true` when the flag is on; nothing otherwise.
    pub fn set_flag(&mut self, name: &str, flag: bool) {
        if flag {
            self.set(name, "true");
        }
    }

    /// Write `label.1`, `label.2`, ... for each value.
    pub fn list<T>(&mut self, label: &str, values: &[T])
    where
        T: AsRef<str>,
    {
        for (i, value) in values.iter().enumerate() {
            let key = self.key(&format!("{label}.{}", i + 1));
            self.map.insert(key, value.as_ref().to_string());
        }
    }

    /// Encode each item under `label.N.`.
    pub fn indexed<T>(&mut self, label: &str, items: &[T])
    where
        T: EncodeParams,
    {
        for (i, item) in items.iter().enumerate() {
            let mut scope = self.nested(&format!("{label}.{}", i + 1));
            item.encode_params(&mut scope);
        }
    }

    /// Scope for keys below `name.`.
    pub fn nested(&mut self, name: &str) -> ParamScope<'_> {
        let prefix = format!("{}{name}.", self.prefix);
        ParamScope {
            map: &mut *self.map,
            prefix,
        }
    }

    /// Write a list of references that carry either an id or a name.
    ///
    /// Entries with an id go to `id_label.N`, the others to `name_label.N`,
    /// each list numbered on its own so neither has gaps.
    pub fn id_or_name_list<'r, I>(&mut self, id_label: &str, name_label: &str, refs: I)
    where
        I: IntoIterator<Item = (&'r str, &'r str)>,
    {
        let (mut ids, mut names) = (0, 0);
        for (id, name) in refs {
            if id.is_empty() {
                names += 1;
                self.set(&format!("{name_label}.{names}"), name);
            } else {
                ids += 1;
                self.set(&format!("{id_label}.{ids}"), id);
            }
        }
    }

    /// Write a single reference as `id_key` when the id is set, else `name_key`.
    pub fn id_or_name(&mut self, id_key: &str, name_key: &str, id: &str, name: &str) {
        if id.is_empty() {
            self.set(name_key, name);
        } else {
            self.set(id_key, id);
        }
    }
}
