use std::collections::HashMap;

use super::error::BencodeError;
use super::value::Value;

/// Deepest nesting of lists and dictionaries accepted by the decoder.
pub const MAX_DEPTH: usize = 64;

/// Decode a single value from the start of `data`.
///
/// Returns the value and the number of bytes it occupied. Whatever follows
/// is left untouched.
pub fn decode_prefix(data: &[u8]) -> Result<(Value, usize), BencodeError> {
    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;
    Ok((value, pos))
}

/// Decode `data` as one value.
///
/// Bytes after the value are ignored; a truncated or malformed value is an
/// error.
pub fn decode(data: &[u8]) -> Result<Value, BencodeError> {
    let (value, consumed) = decode_prefix(data)?;

    if consumed != data.len() {
        tracing::debug!(
            trailing = data.len() - consumed,
            "ignoring bytes after bencode value"
        );
    }

    Ok(value)
}

/// `depth` counts the lists and dictionaries enclosing the value at `pos`.
fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    match data[*pos] {
        b'i' => decode_integer(data, pos),
        b'l' => decode_list(data, pos, depth),
        b'd' => decode_dict(data, pos, depth),
        b'0'..=b'9' => decode_bytes(data, pos),
        c => Err(BencodeError::UnexpectedChar(c as char, *pos)),
    }
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    *pos += 1;

    let start = *pos;
    while *pos < data.len() && data[*pos] != b'e' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let int_str = std::str::from_utf8(&data[start..*pos])
        .map_err(|_| BencodeError::InvalidInteger("invalid utf8".into()))?;

    let digits = int_str.strip_prefix('-').unwrap_or(int_str);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(BencodeError::InvalidInteger(int_str.into()));
    }

    if int_str.starts_with("-0") || (digits.starts_with('0') && digits.len() > 1) {
        return Err(BencodeError::InvalidInteger("leading zeros".into()));
    }

    // Width is unbounded; only the digits are kept
    *pos += 1;
    Ok(Value::Integer(int_str.to_string()))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Value, BencodeError> {
    let start = *pos;
    while *pos < data.len() && data[*pos] != b':' {
        *pos += 1;
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let len_str =
        std::str::from_utf8(&data[start..*pos]).map_err(|_| BencodeError::InvalidStringLength)?;

    let len: usize = len_str
        .parse()
        .map_err(|_| BencodeError::InvalidStringLength)?;

    *pos += 1;

    let end = pos.checked_add(len).ok_or(BencodeError::InvalidStringLength)?;
    if end > data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    let bytes = data[*pos..end].to_vec();
    *pos = end;

    Ok(Value::Bytes(bytes))
}

fn enter_container(depth: usize) -> Result<usize, BencodeError> {
    if depth >= MAX_DEPTH {
        return Err(BencodeError::NestingTooDeep);
    }
    Ok(depth + 1)
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    let depth = enter_container(depth)?;
    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth)?);
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, BencodeError> {
    let depth = enter_container(depth)?;
    *pos += 1;
    let mut dict: Vec<(Vec<u8>, Value)> = Vec::new();
    let mut index: HashMap<Vec<u8>, usize> = HashMap::new();

    while *pos < data.len() && data[*pos] != b'e' {
        let key_pos = *pos;
        let key = match decode_value(data, pos, depth)? {
            Value::Bytes(b) => b,
            _ => return Err(BencodeError::NonStringKey(key_pos)),
        };

        let value = decode_value(data, pos, depth)?;
        match index.get(&key) {
            Some(&slot) => dict[slot].1 = value,
            None => {
                index.insert(key.clone(), dict.len());
                dict.push((key, value));
            }
        }
    }

    if *pos >= data.len() {
        return Err(BencodeError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
