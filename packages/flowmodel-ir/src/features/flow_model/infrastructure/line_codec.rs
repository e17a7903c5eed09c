//! Model line codec
//!
//! Accepted forms:
//! - summary: `package;type;subtypes;name;signature;ext;input;output;kind;provenance`
//!   (9-field form without provenance when `accept_legacy_lines` is set)
//! - neutral: `package;type;name;signature;category[;provenance]`
//! - annotated: `[SPURIOUS-|MISSING-]<tag>=<line>` where tag is one of
//!   `summary`, `contentbased-summary`, `neutral`, `source`, `sink`
//!
//! Bare lines are dispatched on their field count. Serialization is the
//! `Display` impl of each record.

use super::validation::RecordValidator;
use crate::config::IngestConfig;
use crate::features::access_path::{self, AccessPath};
use crate::features::flow_model::domain::{
    AnnotatedRecord, EndpointRecord, EndpointRole, Expectation, FlowKind, LineTag, MemberKey,
    ModelRecord, NeutralCategory, NeutralRecord, Provenance, Signature, SummaryRecord,
};
use crate::features::flow_model::error::{IngestError, LineError, LineErrorReason, LineField};
use std::str::FromStr;

/// Parses and validates model lines
#[derive(Debug, Clone)]
pub struct LineCodec {
    config: IngestConfig,
    validator: RecordValidator,
}

impl LineCodec {
    pub fn new(config: IngestConfig) -> Self {
        let validator = RecordValidator::new(&config);
        Self { config, validator }
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    /// Parse one line into a record, dropping any annotation
    pub fn parse(&self, line: &str) -> Result<ModelRecord, IngestError> {
        self.parse_annotated(line).map(|annotated| annotated.record)
    }

    /// Parse one line, keeping its tag and expectation marker
    pub fn parse_annotated(&self, line: &str) -> Result<AnnotatedRecord, IngestError> {
        let leading = line.len() - line.trim_start().len();
        let body = line.trim();
        if body.is_empty() {
            return Err(LineError::new(LineField::Line, 0, LineErrorReason::EmptyLine).into());
        }

        let (annotation, body, base) = split_annotation(body, leading)?;
        let fields = split_fields(body, base);

        let record = match annotation.map(|(tag, _)| tag) {
            None => match fields.len() {
                9 | 10 => ModelRecord::Summary(self.parse_summary(&fields, base)?),
                5 | 6 => ModelRecord::Neutral(parse_neutral(&fields, base)?),
                found => {
                    return Err(LineError::new(
                        LineField::Line,
                        base,
                        LineErrorReason::FieldCount {
                            expected: "5, 6, 9 or 10",
                            found,
                        },
                    )
                    .into())
                }
            },
            Some(LineTag::Summary | LineTag::ContentbasedSummary) => {
                ModelRecord::Summary(self.parse_summary(&fields, base)?)
            }
            Some(LineTag::Neutral) => ModelRecord::Neutral(parse_neutral(&fields, base)?),
            Some(LineTag::Source) => {
                ModelRecord::Endpoint(self.parse_endpoint(EndpointRole::Source, &fields, base)?)
            }
            Some(LineTag::Sink) => {
                ModelRecord::Endpoint(self.parse_endpoint(EndpointRole::Sink, &fields, base)?)
            }
        };

        let (tag, expectation) = match annotation {
            Some((tag, expectation)) => (Some(tag), expectation),
            None => (None, Expectation::Expected),
        };
        Ok(AnnotatedRecord {
            tag,
            expectation,
            record,
        })
    }

    fn parse_summary(
        &self,
        fields: &[Field<'_>],
        base: usize,
    ) -> Result<SummaryRecord, IngestError> {
        let provenance = match fields.len() {
            10 => parse_provenance(&fields[9])?,
            9 if self.config.accept_legacy_lines => Provenance::manual(),
            9 => {
                return Err(
                    LineError::new(LineField::Line, base, LineErrorReason::LegacyLine).into(),
                )
            }
            found => {
                return Err(LineError::new(
                    LineField::Line,
                    base,
                    LineErrorReason::FieldCount {
                        expected: "9 or 10",
                        found,
                    },
                )
                .into())
            }
        };

        let subject = parse_member(&fields[..5], true)?;
        let kind_field = &fields[8];
        let kind = FlowKind::from_label(kind_field.text).ok_or_else(|| {
            LineError::new(
                LineField::Kind,
                kind_field.column,
                LineErrorReason::InvalidKind(kind_field.text.to_string()),
            )
        })?;

        let record = SummaryRecord {
            subject,
            ext: fields[5].text.to_string(),
            input: parse_path(&fields[6], LineField::Input)?,
            output: parse_path(&fields[7], LineField::Output)?,
            kind,
            provenance,
        };
        self.validator.validate_summary(&record)?;
        Ok(record)
    }

    fn parse_endpoint(
        &self,
        role: EndpointRole,
        fields: &[Field<'_>],
        base: usize,
    ) -> Result<EndpointRecord, IngestError> {
        if fields.len() != 9 {
            return Err(LineError::new(
                LineField::Line,
                base,
                LineErrorReason::FieldCount {
                    expected: "9",
                    found: fields.len(),
                },
            )
            .into());
        }

        let record = EndpointRecord {
            role,
            subject: parse_member(&fields[..5], true)?,
            ext: fields[5].text.to_string(),
            path: parse_path(&fields[6], LineField::Path)?,
            label: required(&fields[7], LineField::Label)?.to_string(),
            provenance: parse_provenance(&fields[8])?,
        };
        self.validator.validate_endpoint(&record)?;
        Ok(record)
    }
}

impl Default for LineCodec {
    fn default() -> Self {
        Self::new(IngestConfig::default())
    }
}

/// Parse `package;type;subtypes;name;signature`
pub fn parse_member_key(text: &str) -> Result<MemberKey, LineError> {
    let leading = text.len() - text.trim_start().len();
    let fields = split_fields(text.trim(), leading);
    if fields.len() != 5 {
        return Err(LineError::new(
            LineField::Line,
            leading,
            LineErrorReason::FieldCount {
                expected: "5",
                found: fields.len(),
            },
        ));
    }
    parse_member(&fields, true)
}

impl FromStr for MemberKey {
    type Err = LineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_member_key(s)
    }
}

// ============================================================================
// Field helpers
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Field<'a> {
    text: &'a str,
    column: usize,
}

type Annotation = (LineTag, Expectation);

fn split_annotation(
    body: &str,
    base: usize,
) -> Result<(Option<Annotation>, &str, usize), LineError> {
    let eq = match body.find('=') {
        Some(eq) if body.find(';').map_or(true, |semi| eq < semi) => eq,
        _ => return Ok((None, body, base)),
    };

    let label = &body[..eq];
    let (expectation, tag) = if let Some(rest) = label.strip_prefix("SPURIOUS-") {
        (Expectation::Spurious, rest)
    } else if let Some(rest) = label.strip_prefix("MISSING-") {
        (Expectation::Missing, rest)
    } else {
        (Expectation::Expected, label)
    };
    let tag = LineTag::from_label(tag).ok_or_else(|| {
        LineError::new(
            LineField::Tag,
            base,
            LineErrorReason::UnknownTag(label.to_string()),
        )
    })?;

    Ok((Some((tag, expectation)), &body[eq + 1..], base + eq + 1))
}

fn split_fields(line: &str, base: usize) -> Vec<Field<'_>> {
    let mut fields = Vec::with_capacity(10);
    let mut start = 0;
    for (i, c) in line.char_indices() {
        if c == ';' {
            fields.push(Field {
                text: &line[start..i],
                column: base + start,
            });
            start = i + 1;
        }
    }
    fields.push(Field {
        text: &line[start..],
        column: base + start,
    });
    fields
}

/// `package;type;subtypes;name;signature` or, for neutrals,
/// `package;type;name;signature`
fn parse_member(fields: &[Field<'_>], with_subtypes: bool) -> Result<MemberKey, LineError> {
    let (subtypes, name, signature) = if with_subtypes {
        (parse_bool(&fields[2])?, &fields[3], &fields[4])
    } else {
        (false, &fields[2], &fields[3])
    };

    Ok(MemberKey {
        package: fields[0].text.to_string(),
        type_name: required(&fields[1], LineField::Type)?.to_string(),
        subtypes,
        name: required(name, LineField::Name)?.to_string(),
        signature: parse_signature(signature)?,
    })
}

fn parse_neutral(fields: &[Field<'_>], base: usize) -> Result<NeutralRecord, IngestError> {
    if !(5..=6).contains(&fields.len()) {
        return Err(LineError::new(
            LineField::Line,
            base,
            LineErrorReason::FieldCount {
                expected: "5 or 6",
                found: fields.len(),
            },
        )
        .into());
    }

    let subject = parse_member(&fields[..4], false)?;
    let category_field = &fields[4];
    let category = NeutralCategory::from_label(category_field.text).ok_or_else(|| {
        LineError::new(
            LineField::Category,
            category_field.column,
            LineErrorReason::InvalidCategory(category_field.text.to_string()),
        )
    })?;
    let provenance = fields.get(5).map(parse_provenance).transpose()?;

    Ok(NeutralRecord {
        subject,
        category,
        provenance,
    })
}

fn required<'a>(field: &Field<'a>, which: LineField) -> Result<&'a str, LineError> {
    if field.text.is_empty() {
        Err(LineError::new(which, field.column, LineErrorReason::EmptyField))
    } else {
        Ok(field.text)
    }
}

fn parse_bool(field: &Field<'_>) -> Result<bool, LineError> {
    match field.text {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(LineError::new(
            LineField::Subtypes,
            field.column,
            LineErrorReason::InvalidBool(other.to_string()),
        )),
    }
}

fn parse_signature(field: &Field<'_>) -> Result<Option<Signature>, LineError> {
    if field.text.is_empty() {
        return Ok(None);
    }
    Signature::parse(field.text).map(Some).ok_or_else(|| {
        LineError::new(
            LineField::Signature,
            field.column,
            LineErrorReason::InvalidSignature(field.text.to_string()),
        )
    })
}

fn parse_path(field: &Field<'_>, which: LineField) -> Result<AccessPath, LineError> {
    access_path::parse(field.text).map_err(|err| {
        LineError::new(
            which,
            field.column + err.offset,
            LineErrorReason::AccessPath(err),
        )
    })
}

fn parse_provenance(field: &Field<'_>) -> Result<Provenance, LineError> {
    required(field, LineField::Provenance).map(Provenance::new)
}
