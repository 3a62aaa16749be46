//! Field enumeration for serde-serializable records.
//!
//! [`to_fields`] walks a struct (or string-keyed map) through serde and
//! returns one [`QueryField`] per declared field, in declaration order, named
//! by its serialized (wire) name. `None` and `()` become absent fields; any
//! value that is not a scalar is rejected.

use crate::error::{Error, Result};
use crate::query::{QueryField, QueryParams};
use crate::value::QueryValue;
use serde::ser::{self, Impossible, Serialize};
use std::collections::HashSet;

/// Enumerate the fields of `record` without dropping absent ones.
///
/// # Errors
///
/// Returns [`Error::UnsupportedValue`] if `record` is not a struct or map, or
/// if any field holds a non-scalar value, and [`Error::DuplicateField`] if a
/// wire name repeats.
pub fn to_fields<T>(record: &T) -> Result<Vec<QueryField>>
where
    T: Serialize + ?Sized,
{
    let mut serializer = RecordSerializer::default();
    record.serialize(&mut serializer)?;

    if let Some(name) = first_duplicate(&serializer.fields) {
        return Err(Error::DuplicateField(name));
    }

    Ok(serializer.fields)
}

/// Encode `record` into query parameters, keeping present fields only.
///
/// # Errors
///
/// See [`to_fields`].
pub fn to_params<T>(record: &T) -> Result<QueryParams>
where
    T: Serialize + ?Sized,
{
    Ok(to_fields(record)?.into_iter().collect())
}

// Absent fields count too: wire names are unique per record.
fn first_duplicate(fields: &[QueryField]) -> Option<String> {
    let mut seen = HashSet::new();
    fields
        .iter()
        .find(|field| !seen.insert(field.name.as_str()))
        .map(|field| field.name.clone())
}

fn unsupported(what: &str) -> Error {
    Error::UnsupportedValue(format!("{what} cannot be used as a query record"))
}

#[derive(Debug, Default)]
struct RecordSerializer {
    fields: Vec<QueryField>,
    pending_key: Option<String>,
}

impl RecordSerializer {
    fn push(&mut self, name: String, value: Option<String>) {
        self.fields.push(QueryField { name, value });
    }
}

impl ser::Serializer for &mut RecordSerializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = Self;
    type SerializeStruct = Self;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Err(unsupported("a boolean"))
    }

    fn serialize_i8(self, _v: i8) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Err(unsupported("an integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(unsupported("a float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(unsupported("a float"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(unsupported("a char"))
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Err(unsupported("a string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(unsupported("a byte array"))
    }

    // An absent record contributes no fields.
    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        Err(unsupported("an enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(unsupported("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(unsupported("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(unsupported("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(unsupported("an enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(self)
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(self)
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(unsupported("an enum variant"))
    }
}

impl ser::SerializeStruct for &mut RecordSerializer {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let value = value
            .serialize(ValueSerializer)
            .map_err(|e| field_error(key, &e))?;
        self.push(key.to_string(), value);
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

// Maps also back `#[serde(flatten)]` structs.
impl ser::SerializeMap for &mut RecordSerializer {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = key
            .serialize(ValueSerializer)?
            .ok_or_else(|| Error::UnsupportedValue("map keys must not be empty".to_string()))?;
        self.pending_key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let key = self.pending_key.take().ok_or_else(|| {
            Error::UnsupportedValue("map value serialized before its key".to_string())
        })?;
        let value = value
            .serialize(ValueSerializer)
            .map_err(|e| field_error(&key, &e))?;
        self.push(key, value);
        Ok(())
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

fn field_error(field: &str, err: &Error) -> Error {
    match err {
        Error::UnsupportedValue(msg) => Error::UnsupportedValue(format!("field `{field}`: {msg}")),
        other => other.clone(),
    }
}

fn not_scalar(what: &str) -> Error {
    Error::UnsupportedValue(format!("{what} is not a scalar query value"))
}

/// Renders a single field value; `Ok(None)` marks the field absent.
struct ValueSerializer;

impl ser::Serializer for ValueSerializer {
    type Ok = Option<String>;
    type Error = Error;

    type SerializeSeq = Impossible<Option<String>, Error>;
    type SerializeTuple = Impossible<Option<String>, Error>;
    type SerializeTupleStruct = Impossible<Option<String>, Error>;
    type SerializeTupleVariant = Impossible<Option<String>, Error>;
    type SerializeMap = Impossible<Option<String>, Error>;
    type SerializeStruct = Impossible<Option<String>, Error>;
    type SerializeStructVariant = Impossible<Option<String>, Error>;

    fn serialize_bool(self, v: bool) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_i128(self, v: i128) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_u128(self, v: u128) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_char(self, v: char) -> Result<Option<String>> {
        Ok(Some(v.to_query_value()))
    }

    fn serialize_str(self, v: &str) -> Result<Option<String>> {
        Ok(Some(v.to_owned()))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<Option<String>> {
        Err(not_scalar("a byte array"))
    }

    fn serialize_none(self) -> Result<Option<String>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<String>>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<String>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<String>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<String>> {
        Ok(Some(variant.to_owned()))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<String>>
    where
        T: Serialize + ?Sized,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Option<String>>
    where
        T: Serialize + ?Sized,
    {
        Err(not_scalar("an enum variant with data"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(not_scalar("a sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(not_scalar("a tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(not_scalar("a tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(not_scalar("an enum variant with data"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Err(not_scalar("a map"))
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Err(not_scalar("a nested struct"))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(not_scalar("an enum variant with data"))
    }
}
