// src/codec.rs

//! 平台自定义的请求/响应封装格式:
//! 紧凑 JSON -> base64url，编码时去掉 `=` 填充，解码时按 `(-len) mod 4` 补回。
//! JSON 中的非 ASCII 字符一律写成 `\uXXXX`。

use crate::error::AppResult;
use base64::{
    Engine as _, alphabet,
    engine::{
        DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig, general_purpose::URL_SAFE_NO_PAD,
    },
};
use log::debug;
use serde::Serialize;
use serde_json::{Value, json, ser::Formatter};
use std::io;

/// 上游的编码并不规范: 末尾多余的比特位不为零，填充可有可无
const LENIENT_URL_SAFE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// 紧凑输出 (无空白)，非 ASCII 字符转义为小写十六进制的 `\uXXXX`，
/// 超出 BMP 的字符写成代理对
struct AsciiFormatter;

impl Formatter for AsciiFormatter {
    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let mut rest = fragment;
        while let Some(pos) = rest.find(|c: char| !c.is_ascii()) {
            writer.write_all(rest[..pos].as_bytes())?;
            let mut chars = rest[pos..].chars();
            if let Some(c) = chars.next() {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    write!(writer, "\\u{:04x}", unit)?;
                }
            }
            rest = chars.as_str();
        }
        writer.write_all(rest.as_bytes())
    }
}

/// 将任意可序列化的值编码为 `layer_two_input_data` 所需的字符串
pub fn encode_payload<T: Serialize + ?Sized>(payload: &T) -> AppResult<String> {
    let mut serializer = serde_json::Serializer::with_formatter(Vec::new(), AsciiFormatter);
    payload.serialize(&mut serializer)?;
    Ok(URL_SAFE_NO_PAD.encode(serializer.into_inner()))
}

pub fn decode_payload(encoded: &str) -> AppResult<Value> {
    // 兼容标准字母表的 '+' 与 '/'
    let normalized = encoded.replace('+', "-").replace('/', "_");
    let padding = (4 - normalized.len() % 4) % 4;
    let mut padded = String::with_capacity(normalized.len() + padding);
    padded.push_str(&normalized);
    padded.extend(std::iter::repeat_n('=', padding));

    let bytes = LENIENT_URL_SAFE.decode(padded.as_bytes())?;
    let text = String::from_utf8(bytes)?;
    Ok(serde_json::from_str(&text)?)
}

/// 永不失败的解码: 出错时返回 `{"error": "..."}`，调用方随后只会看到空列表
pub fn decode_or_error(encoded: &str) -> Value {
    decode_payload(encoded).unwrap_or_else(|e| {
        debug!("响应解码失败: {}", e);
        json!({ "error": e.to_string() })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_encode_strips_padding_and_whitespace() {
        // {"a":1} 为 7 字节，标准 base64 需要一个 '='
        let encoded = encode_payload(&json!({"a": 1})).unwrap();
        assert_eq!(encoded, "eyJhIjoxfQ");
        assert!(!encoded.contains('='));
    }

    #[test]
    fn test_decode_restores_padding() {
        assert_eq!(decode_payload("eyJhIjoxfQ").unwrap(), json!({"a": 1}));
        // 已带填充的输入同样可以解码
        assert_eq!(decode_payload("eyJhIjoxfQ==").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_round_trip_nested_mapping() {
        let value = json!({
            "course_id": "42",
            "layer": 3,
            "nested": {"list": [1, "two", null, true], "empty": {}},
            "unicode": "课程 ü",
            "revert_api": "1#0#0#0",
        });
        let encoded = encode_payload(&value).unwrap();
        assert_eq!(decode_payload(&encoded).unwrap(), value);
    }

    #[test]
    fn test_url_safe_alphabet_is_used() {
        // "??>" 在标准 base64 中会产生 '/' 和 '+'
        let encoded = encode_payload(&json!({"k": "??>>"})).unwrap();
        assert!(!encoded.contains('+') && !encoded.contains('/'));
        assert_eq!(decode_payload(&encoded).unwrap(), json!({"k": "??>>"}));
    }

    #[test]
    fn test_decode_accepts_standard_alphabet() {
        assert_eq!(decode_payload("eyJrIjoiPz8+PiJ9").unwrap(), json!({"k": "??>>"}));
    }

    #[test]
    fn test_decode_ignores_nonzero_trailing_bits() {
        // 'R' 与 'Q' 只在被丢弃的低位上不同
        assert_eq!(decode_payload("eyJhIjoxfR").unwrap(), json!({"a": 1}));
        assert_eq!(decode_payload("eyJhIjoxfR=").unwrap(), json!({"a": 1}));
    }

    #[test]
    fn test_encode_escapes_non_ascii() {
        let encoded = encode_payload(&json!({"t": "课", "e": "é😀"})).unwrap();
        let raw = String::from_utf8(URL_SAFE_NO_PAD.decode(&encoded).unwrap()).unwrap();
        assert_eq!(raw, r#"{"e":"\u00e9\ud83d\ude00","t":"\u8bfe"}"#);
        assert!(raw.is_ascii());

        // 转义与控制字符仍按 JSON 规则处理
        let encoded = encode_payload(&json!({"q": "a\"b\n课"})).unwrap();
        let raw = String::from_utf8(URL_SAFE_NO_PAD.decode(&encoded).unwrap()).unwrap();
        assert_eq!(raw, r#"{"q":"a\"b\n\u8bfe"}"#);
    }

    #[test]
    fn test_decode_or_error_never_panics() {
        let bad_base64 = decode_or_error("!!!not-base64!!!");
        assert!(bad_base64.get("error").is_some());

        // 合法 base64，但内容不是 JSON
        let not_json = decode_or_error(&URL_SAFE_NO_PAD.encode("plain text"));
        assert!(not_json["error"].is_string());

        let empty = decode_or_error("");
        assert!(empty.get("error").is_some());
    }
}
