//! Server-side filtering for describe calls.
//!
//! ```
//! use ec2_core::filter::Filter;
//!
//! let mut filter = Filter::new();
//! filter.add("architecture", ["i386"]);
//! filter.add("launch-index", ["0"]);
//! ```

use std::collections::HashMap;

use crate::query::Params;

/// Named, multi-valued filter criteria for a describe request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Filter {
    values: HashMap<String, Vec<String>>,
}

impl Filter {
    /// Create an empty filter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append values under `name`, keeping any values already added for it.
    pub fn add<I, V>(&mut self, name: impl Into<String>, values: I)
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.values
            .entry(name.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
    }

    /// Builder form of [`Filter::add`].
    #[must_use]
    pub fn with<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.add(name, values);
        self
    }

    /// Values recorded under `name`, in the order they were added.
    #[must_use]
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.values.get(name).map(Vec::as_slice)
    }

    /// Returns true if no filter names were added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Write `Filter.N.Name` / `Filter.N.Value.M` pairs into `params`.
    ///
    /// Names are numbered in lexicographic order so the request is the same
    /// whatever order they were added in.
    pub fn encode_into(&self, params: &mut Params) {
        let mut names: Vec<&String> = self.values.keys().collect();
        names.sort();

        let mut root = params.root();
        for (i, name) in names.into_iter().enumerate() {
            let mut scope = root.nested(&format!("Filter.{}", i + 1));
            scope.set("Name", name);
            scope.list("Value", &self.values[name]);
        }
    }
}

/// Encode an optional filter; `None` leaves `params` untouched.
pub fn encode_filter(filter: Option<&Filter>, params: &mut Params) {
    if let Some(filter) = filter {
        filter.encode_into(params);
    }
}
