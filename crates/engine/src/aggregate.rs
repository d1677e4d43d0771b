//! Aggregate binder
//!
//! Persists and restores every persistable field of a record under
//! hierarchical keys `id ++ "/" ++ field_name`. Records describe their fields
//! through a statically declared table ([`Record::fields`]); nothing is
//! discovered at runtime and fields missing from the table are never touched.
//!
//! The walk is strictly sequential and never aborts: every field is attempted
//! and gets its own outcome. Callers choose fail-fast or collect-all on top of
//! the returned outcomes, or hand in an error sink.

use crate::persistent::Persistent;
use std::fmt;
use tracing::{debug, warn};
use typedkv_core::{display_key, field_key, Error, Result, Store};

/// One entry of a record's field table
///
/// `get` returns `None` when the field is absent; `get_or_default` allocates
/// a default value for an absent field and hands it out for restore.
pub struct Field<R> {
    name: &'static str,
    get: fn(&R) -> Option<&dyn Persistent>,
    get_or_default: fn(&mut R) -> &mut dyn Persistent,
}

impl<R> Field<R> {
    /// Build a field table entry
    pub fn new(
        name: &'static str,
        get: fn(&R) -> Option<&dyn Persistent>,
        get_or_default: fn(&mut R) -> &mut dyn Persistent,
    ) -> Self {
        Self {
            name,
            get,
            get_or_default,
        }
    }

    /// Name used in the field's key
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<R> fmt::Debug for Field<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field").field("name", &self.name).finish()
    }
}

/// A record made of named, independently persistable fields
///
/// Usually implemented with the [`fields!`](crate::fields) macro:
///
/// ```
/// use typedkv_engine::{fields, Field, Record};
///
/// #[derive(Default)]
/// struct User {
///     name: Option<String>,
///     age: Option<u32>,
///     session: Vec<u8>, // not in the table, never persisted
/// }
///
/// impl Record for User {
///     fn fields() -> Vec<Field<Self>> {
///         fields![User { name as "Name", age as "Age" }]
///     }
/// }
/// ```
pub trait Record {
    /// Ordered field table
    fn fields() -> Vec<Field<Self>>
    where
        Self: Sized;
}

/// Result of persisting or restoring one field
#[derive(Debug)]
pub struct FieldOutcome {
    /// Field name
    pub field: &'static str,
    /// What happened
    pub result: Result<()>,
}

impl FieldOutcome {
    /// True if the field was handled without error
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// First failing outcome, for fail-fast callers
pub fn first_error(outcomes: Vec<FieldOutcome>) -> Result<()> {
    outcomes
        .into_iter()
        .map(|o| o.result)
        .find(|r| r.is_err())
        .unwrap_or(Ok(()))
}

/// Persist every present field of `record` under `id`
///
/// Absent fields are skipped: no key is written and no outcome is reported.
/// Returns one outcome per attempted field, in table order.
pub fn persist_record<R: Record>(
    id: impl AsRef<[u8]>,
    record: &R,
    store: &dyn Store,
) -> Vec<FieldOutcome> {
    let id = id.as_ref();
    let mut outcomes = Vec::new();
    for field in R::fields() {
        let Some(value) = (field.get)(record) else {
            continue;
        };
        let result = value.persist(store, &field_key(id, field.name));
        if let Err(e) = &result {
            warn!(target: "typedkv::aggregate", id = %display_key(id), field = field.name, error = %e, "Field persist failed");
        }
        outcomes.push(FieldOutcome {
            field: field.name,
            result,
        });
    }
    debug!(target: "typedkv::aggregate", id = %display_key(id), fields = outcomes.len(), "Record persisted");
    outcomes
}

/// Restore every field of `record` from `id`
///
/// Absent fields are first replaced by a default value, so afterwards every
/// field in the table is present. A field that was never written reports
/// `NotFound` and keeps its default.
pub fn restore_record<R: Record>(
    id: impl AsRef<[u8]>,
    record: &mut R,
    store: &dyn Store,
) -> Vec<FieldOutcome> {
    let id = id.as_ref();
    let mut outcomes = Vec::new();
    for field in R::fields() {
        let value = (field.get_or_default)(record);
        let result = value.restore(store, &field_key(id, field.name));
        match &result {
            Err(e) if e.is_not_found() => {
                debug!(target: "typedkv::aggregate", id = %display_key(id), field = field.name, "Field not stored");
            }
            Err(e) => {
                warn!(target: "typedkv::aggregate", id = %display_key(id), field = field.name, error = %e, "Field restore failed");
            }
            Ok(()) => {}
        }
        outcomes.push(FieldOutcome {
            field: field.name,
            result,
        });
    }
    outcomes
}

/// Persist `record`, delivering each failing field to `on_error`
///
/// `on_error` is called once per failing field, in table order. The walk
/// continues past failures.
pub fn persist_aggregate<R, F>(id: impl AsRef<[u8]>, record: &R, store: &dyn Store, on_error: F)
where
    R: Record,
    F: FnMut(&'static str, Error),
{
    deliver(persist_record(id, record, store), on_error);
}

/// Restore `record`, delivering each failing field to `on_error`
///
/// Fields that were never written are delivered as `NotFound`.
pub fn restore_aggregate<R, F>(
    id: impl AsRef<[u8]>,
    record: &mut R,
    store: &dyn Store,
    on_error: F,
) where
    R: Record,
    F: FnMut(&'static str, Error),
{
    deliver(restore_record(id, record, store), on_error);
}

pub(crate) fn deliver<F>(outcomes: Vec<FieldOutcome>, mut on_error: F)
where
    F: FnMut(&'static str, Error),
{
    for outcome in outcomes {
        if let Err(e) = outcome.result {
            on_error(outcome.field, e);
        }
    }
}

/// Persist a record nested inside another value (list element or field)
///
/// Every field is attempted; the first failure is returned.
#[doc(hidden)]
pub fn persist_nested<R: Record>(record: &R, store: &dyn Store, key: &[u8]) -> Result<()> {
    first_error(persist_record(key, record, store))
}

/// Restore a record nested inside another value
///
/// A record none of whose fields were written is `NotFound` under `key`.
/// Otherwise fields that were never written stay at their default and the
/// first other failure is returned.
#[doc(hidden)]
pub fn restore_nested<R: Record>(record: &mut R, store: &dyn Store, key: &[u8]) -> Result<()> {
    let outcomes = restore_record(key, record, store);
    if !outcomes.is_empty()
        && outcomes
            .iter()
            .all(|o| matches!(&o.result, Err(e) if e.is_not_found()))
    {
        return Err(Error::not_found(key));
    }
    outcomes
        .into_iter()
        .map(|o| o.result)
        .find(|r| matches!(r, Err(e) if !e.is_not_found()))
        .unwrap_or(Ok(()))
}

/// Build a field table from `Option<T>` struct fields
///
/// Each listed field must have type `Option<T>` with `T: Persistent +
/// Default`. The key segment defaults to the Rust field name; `field as
/// "Name"` overrides it.
///
/// ```
/// use typedkv_engine::{fields, Field, Record};
///
/// #[derive(Default)]
/// struct Point {
///     x: Option<i64>,
///     y: Option<i64>,
/// }
///
/// impl Record for Point {
///     fn fields() -> Vec<Field<Self>> {
///         fields![Point { x, y }]
///     }
/// }
///
/// assert_eq!(Point::fields()[1].name(), "y");
/// ```
#[macro_export]
macro_rules! fields {
    (@name $field:ident) => {
        stringify!($field)
    };
    (@name $field:ident $name:literal) => {
        $name
    };
    ($record:ty { $($field:ident $(as $name:literal)?),* $(,)? }) => {
        vec![$(
            $crate::Field::<$record>::new(
                $crate::fields!(@name $field $($name)?),
                |r| r.$field.as_ref().map(|v| v as &dyn $crate::Persistent),
                |r| r.$field.get_or_insert_with(::std::default::Default::default)
                    as &mut dyn $crate::Persistent,
            )
        ),*]
    };
}

/// Make a [`Record`] usable wherever a [`Persistent`] is expected
///
/// The record reports the `Undefined` tag and uses the raw key it is given as
/// its record id, so a list of records stores element `i`'s fields under
/// `list_key ++ ":" ++ [Undefined] ++ i ++ "/" ++ field`. The type must
/// implement `Default`.
#[macro_export]
macro_rules! impl_persistent_record {
    ($($record:ty),* $(,)?) => {
        $(
            impl $crate::Persistent for $record {
                fn tag(&self) -> $crate::TypeTag {
                    $crate::TypeTag::Undefined
                }

                fn persist(&self, store: &dyn $crate::Store, key: &[u8]) -> $crate::Result<()> {
                    $crate::aggregate::persist_nested(self, store, key)
                }

                fn restore(&mut self, store: &dyn $crate::Store, key: &[u8]) -> $crate::Result<()> {
                    $crate::aggregate::restore_nested(self, store, key)
                }

                fn placeholder(tag: $crate::TypeTag) -> ::std::option::Option<Self> {
                    (tag == $crate::TypeTag::Undefined).then(<$record as ::std::default::Default>::default)
                }
            }
        )*
    };
}
