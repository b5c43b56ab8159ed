//! Codec for the egsinp template format.
//!
//! The format is line-oriented: `key = value` pairs with `#` comments, plus
//! component module blocks delimited by `:start cm:` / `:stop cm:`. The codec
//! parses the fields the instantiation step needs into typed struct fields and
//! carries every other key through verbatim, so a template round-trips with
//! all of its values intact.

use std::fmt::Write as _;
use thiserror::Error;

const CM_START: &str = ":start cm:";
const CM_STOP: &str = ":stop cm:";

#[derive(Debug, Error)]
pub enum EgsinpError {
    #[error("Parse error on line {line}: {kind}")]
    Parse {
        line: usize,
        kind: EgsinpParseErrorKind,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(&'static str),
}

#[derive(Debug, Error)]
pub enum EgsinpParseErrorKind {
    #[error("Invalid integer format for key '{key}' (value: '{value}')")]
    InvalidInt { key: String, value: String },
    #[error("Invalid float format for key '{key}' (value: '{value}')")]
    InvalidFloat { key: String, value: String },
    #[error("Line is neither a 'key = value' pair nor a block delimiter")]
    MalformedLine,
    #[error("'{CM_STOP}' without a matching '{CM_START}'")]
    UnmatchedStop,
    #[error("'{CM_START}' block is never closed")]
    UnclosedBlock,
    #[error("Component module block is missing required key '{key}'")]
    IncompleteBlock { key: &'static str },
}

/// One component module of the accelerator geometry. The first module in a
/// template is the x-ray tube; its `rmax_cm` and `angelei` (anode angle) are
/// the fields the instantiation step rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentModule {
    pub kind: String,
    pub rmax_cm: f64,
    pub angelei: Option<f64>,
    extra: Vec<(String, String)>,
}

/// In-memory representation of one simulation input file.
#[derive(Debug, Clone, PartialEq)]
pub struct EgsinpDocument {
    pub title: String,
    pub ncase: u64,
    pub ybeam: f64,
    pub zbeam: f64,
    pub uinc: f64,
    pub vinc: f64,
    pub cms: Vec<ComponentModule>,
    extra: Vec<(String, String)>,
}

#[derive(Default)]
struct CmBuilder {
    kind: Option<String>,
    rmax_cm: Option<f64>,
    angelei: Option<f64>,
    extra: Vec<(String, String)>,
}

fn parse_f64(key: &str, value: &str, line: usize) -> Result<f64, EgsinpError> {
    value.parse().map_err(|_| EgsinpError::Parse {
        line,
        kind: EgsinpParseErrorKind::InvalidFloat {
            key: key.to_string(),
            value: value.to_string(),
        },
    })
}

fn parse_u64(key: &str, value: &str, line: usize) -> Result<u64, EgsinpError> {
    value.parse().map_err(|_| EgsinpError::Parse {
        line,
        kind: EgsinpParseErrorKind::InvalidInt {
            key: key.to_string(),
            value: value.to_string(),
        },
    })
}

pub fn parse_egsinp(text: &str) -> Result<EgsinpDocument, EgsinpError> {
    let mut title = None;
    let mut ncase = None;
    let mut ybeam = None;
    let mut zbeam = None;
    let mut uinc = None;
    let mut vinc = None;
    let mut cms: Vec<ComponentModule> = Vec::new();
    let mut extra: Vec<(String, String)> = Vec::new();
    let mut current_cm: Option<CmBuilder> = None;

    for (line_num, raw) in text.lines().enumerate() {
        let line_num = line_num + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if line.eq_ignore_ascii_case(CM_START) {
            if current_cm.is_some() {
                return Err(EgsinpError::Parse {
                    line: line_num,
                    kind: EgsinpParseErrorKind::UnclosedBlock,
                });
            }
            current_cm = Some(CmBuilder::default());
            continue;
        }

        if line.eq_ignore_ascii_case(CM_STOP) {
            let builder = current_cm.take().ok_or(EgsinpError::Parse {
                line: line_num,
                kind: EgsinpParseErrorKind::UnmatchedStop,
            })?;
            let kind = builder.kind.ok_or(EgsinpError::Parse {
                line: line_num,
                kind: EgsinpParseErrorKind::IncompleteBlock { key: "type" },
            })?;
            let rmax_cm = builder.rmax_cm.ok_or(EgsinpError::Parse {
                line: line_num,
                kind: EgsinpParseErrorKind::IncompleteBlock { key: "rmax_cm" },
            })?;
            cms.push(ComponentModule {
                kind,
                rmax_cm,
                angelei: builder.angelei,
                extra: builder.extra,
            });
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(EgsinpError::Parse {
                line: line_num,
                kind: EgsinpParseErrorKind::MalformedLine,
            });
        };
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim();

        if let Some(builder) = current_cm.as_mut() {
            match key.as_str() {
                "type" => builder.kind = Some(value.to_string()),
                "rmax_cm" => builder.rmax_cm = Some(parse_f64(&key, value, line_num)?),
                "angelei" => builder.angelei = Some(parse_f64(&key, value, line_num)?),
                _ => builder.extra.push((key, value.to_string())),
            }
        } else {
            match key.as_str() {
                "title" => title = Some(value.to_string()),
                "ncase" => ncase = Some(parse_u64(&key, value, line_num)?),
                "ybeam" => ybeam = Some(parse_f64(&key, value, line_num)?),
                "zbeam" => zbeam = Some(parse_f64(&key, value, line_num)?),
                "uinc" => uinc = Some(parse_f64(&key, value, line_num)?),
                "vinc" => vinc = Some(parse_f64(&key, value, line_num)?),
                _ => extra.push((key, value.to_string())),
            }
        }
    }

    if current_cm.is_some() {
        return Err(EgsinpError::Parse {
            line: text.lines().count(),
            kind: EgsinpParseErrorKind::UnclosedBlock,
        });
    }
    if cms.is_empty() {
        return Err(EgsinpError::MissingRecord("cm"));
    }

    Ok(EgsinpDocument {
        title: title.ok_or(EgsinpError::MissingRecord("title"))?,
        ncase: ncase.ok_or(EgsinpError::MissingRecord("ncase"))?,
        ybeam: ybeam.ok_or(EgsinpError::MissingRecord("ybeam"))?,
        zbeam: zbeam.ok_or(EgsinpError::MissingRecord("zbeam"))?,
        uinc: uinc.ok_or(EgsinpError::MissingRecord("uinc"))?,
        vinc: vinc.ok_or(EgsinpError::MissingRecord("vinc"))?,
        cms,
        extra,
    })
}

pub fn unparse_egsinp(doc: &EgsinpDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "title = {}", doc.title);
    let _ = writeln!(out, "ncase = {}", doc.ncase);
    let _ = writeln!(out, "ybeam = {}", doc.ybeam);
    let _ = writeln!(out, "zbeam = {}", doc.zbeam);
    let _ = writeln!(out, "uinc = {}", doc.uinc);
    let _ = writeln!(out, "vinc = {}", doc.vinc);
    for (key, value) in &doc.extra {
        let _ = writeln!(out, "{} = {}", key, value);
    }
    for cm in &doc.cms {
        let _ = writeln!(out, "{}", CM_START);
        let _ = writeln!(out, "    type = {}", cm.kind);
        let _ = writeln!(out, "    rmax_cm = {}", cm.rmax_cm);
        if let Some(angelei) = cm.angelei {
            let _ = writeln!(out, "    angelei = {}", angelei);
        }
        for (key, value) in &cm.extra {
            let _ = writeln!(out, "    {} = {}", key, value);
        }
        let _ = writeln!(out, "{}", CM_STOP);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# sample template
title = scanning beam
ncase = 100000
ybeam = 0.1
zbeam = 0.25
uinc = -1.0
vinc = 0.0
iqin = -1
ein = 120.0

:start cm:
    type = XTUBE
    rmax_cm = 10.0
    angelei = 15.0
    zthick = 0.3
:stop cm:
";

    #[test]
    fn parses_typed_fields_from_sample() {
        let doc = parse_egsinp(SAMPLE).unwrap();
        assert_eq!(doc.title, "scanning beam");
        assert_eq!(doc.ncase, 100_000);
        assert_eq!(doc.ybeam, 0.1);
        assert_eq!(doc.zbeam, 0.25);
        assert_eq!(doc.uinc, -1.0);
        assert_eq!(doc.vinc, 0.0);
        assert_eq!(doc.cms.len(), 1);
        assert_eq!(doc.cms[0].kind, "XTUBE");
        assert_eq!(doc.cms[0].rmax_cm, 10.0);
        assert_eq!(doc.cms[0].angelei, Some(15.0));
    }

    #[test]
    fn unknown_keys_pass_through_round_trip() {
        let doc = parse_egsinp(SAMPLE).unwrap();
        assert!(doc.extra.contains(&("iqin".to_string(), "-1".to_string())));
        let text = unparse_egsinp(&doc);
        assert!(text.contains("iqin = -1"));
        assert!(text.contains("zthick = 0.3"));
    }

    #[test]
    fn round_trip_preserves_all_field_values() {
        let first = parse_egsinp(SAMPLE).unwrap();
        let second = parse_egsinp(&unparse_egsinp(&first)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn missing_required_field_is_reported_by_name() {
        let text = SAMPLE.replace("ncase = 100000\n", "");
        let err = parse_egsinp(&text).unwrap_err();
        assert!(matches!(err, EgsinpError::MissingRecord("ncase")));
    }

    #[test]
    fn template_without_component_modules_is_rejected() {
        let text: String = SAMPLE
            .lines()
            .take_while(|line| !line.starts_with(":start"))
            .map(|line| format!("{line}\n"))
            .collect();
        let err = parse_egsinp(&text).unwrap_err();
        assert!(matches!(err, EgsinpError::MissingRecord("cm")));
    }

    #[test]
    fn invalid_float_reports_line_number() {
        let text = SAMPLE.replace("ybeam = 0.1", "ybeam = wide");
        match parse_egsinp(&text).unwrap_err() {
            EgsinpError::Parse { line, kind } => {
                assert_eq!(line, 4);
                assert!(matches!(
                    kind,
                    EgsinpParseErrorKind::InvalidFloat { .. }
                ));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unmatched_stop_is_rejected() {
        let text = format!("{SAMPLE}{CM_STOP}\n");
        assert!(matches!(
            parse_egsinp(&text).unwrap_err(),
            EgsinpError::Parse {
                kind: EgsinpParseErrorKind::UnmatchedStop,
                ..
            }
        ));
    }

    #[test]
    fn unclosed_block_is_rejected() {
        let text = SAMPLE.replace(CM_STOP, "");
        assert!(matches!(
            parse_egsinp(&text).unwrap_err(),
            EgsinpError::Parse {
                kind: EgsinpParseErrorKind::UnclosedBlock,
                ..
            }
        ));
    }

    #[test]
    fn block_missing_rmax_is_rejected() {
        let text = SAMPLE.replace("    rmax_cm = 10.0\n", "");
        assert!(matches!(
            parse_egsinp(&text).unwrap_err(),
            EgsinpError::Parse {
                kind: EgsinpParseErrorKind::IncompleteBlock { key: "rmax_cm" },
                ..
            }
        ));
    }
}
