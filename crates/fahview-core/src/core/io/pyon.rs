//! Decoder for the three PyON message shapes sent by the daemon.
//!
//! - a trajectory document: one `PyON 1 topology` block followed by any number
//!   of `PyON 1 positions` blocks, each terminated by `---`;
//! - the positions block on its own ([`parse_snapshot`]);
//! - the slot list answered to `slot-info` ([`parse_slot_ids`]).
//!
//! There is no general grammar. Each shape is located by its literal
//! delimiters with the [`scan`](super::scan) primitives, and every record is
//! decoded positionally. Unlike the daemon's own tooling, numeric tokens are
//! parsed strictly: anything that is not a number is an error.

use super::scan::{between, between_span, explode, explode_and_trim, trim};
use crate::core::models::atom::Atom;
use crate::core::models::error::ModelError;
use crate::core::models::snapshot::Snapshot;
use crate::core::models::topology::{Bond, Topology};
use crate::core::models::trajectory::Trajectory;
use nalgebra::Point3;
use thiserror::Error;
use tracing::{debug, instrument};

const TOPOLOGY_HEADER: &str = "PyON 1 topology\n{\n";
const TOPOLOGY_FOOTER: &str = "\n}\n---";
const POSITIONS_HEADER: &str = "PyON 1 positions\n[";
const POSITIONS_FOOTER: &str = "]\n---";
const ATOMS_HEADER: &str = "\"atoms\": [\n";
const ATOMS_FOOTER: &str = "]\n  ],\n";
const EMPTY_ATOMS: &str = "\"atoms\": []";
const BONDS_HEADER: &str = "\"bonds\": [\n";
const BONDS_FOOTER: &str = "]\n";
const EMPTY_BONDS: &str = "\"bonds\": []";
const SLOT_ID_KEY: &str = "\"id\":";
const SLOT_ID_TERMINATOR: &str = ",\n";

/// Characters wrapped around a whole record line.
const RECORD_TRIM: &str = " \t\r[],";
/// Characters wrapped around a single field of a record.
const TOKEN_TRIM: &str = " \t\r\n\"";

const ATOM_FIELDS: usize = 5;
const BOND_FIELDS: usize = 2;
const POSITION_FIELDS: usize = 3;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PyonError {
    #[error("Malformed message: no block between {header:?} and {footer:?}")]
    MalformedMessage {
        header: &'static str,
        footer: &'static str,
    },

    #[error("Record '{record}' has {found} fields, expected {expected}")]
    UnexpectedTokenCount {
        record: String,
        expected: usize,
        found: usize,
    },

    #[error("Invalid {field} value: '{value}'")]
    NumericParse { field: &'static str, value: String },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl PyonError {
    fn malformed(header: &'static str, footer: &'static str) -> Self {
        Self::MalformedMessage { header, footer }
    }

    fn numeric(field: &'static str, value: &str) -> Self {
        Self::NumericParse {
            field,
            value: value.to_string(),
        }
    }
}

/// Decodes a complete trajectory document.
///
/// The topology block is decoded first, then every positions block in
/// document order becomes one snapshot.
///
/// # Errors
///
/// Returns [`PyonError::MalformedMessage`] if the topology block is missing,
/// a field error for any undecodable record, and [`PyonError::Model`] if a
/// snapshot does not hold one position per atom or a bond points past the
/// last atom.
#[instrument(skip_all, name = "pyon_parse")]
pub fn parse(document: &str) -> Result<Trajectory, PyonError> {
    let topology_block = between(document, TOPOLOGY_HEADER, TOPOLOGY_FOOTER)
        .ok_or(PyonError::malformed(TOPOLOGY_HEADER, TOPOLOGY_FOOTER))?;
    let mut trajectory = Trajectory::new(parse_topology(topology_block)?);

    let mut cursor = 0;
    while let Some(span) = between_span(document, POSITIONS_HEADER, POSITIONS_FOOTER, cursor) {
        let snapshot = parse_snapshot(&document[span.clone()])?;
        trajectory.add_snapshot(snapshot)?;
        cursor = span.end;
    }

    debug!(
        atoms = trajectory.topology().atom_count(),
        bonds = trajectory.topology().bond_count(),
        snapshots = trajectory.count_snapshots(),
        "Decoded trajectory document."
    );
    Ok(trajectory)
}

/// Decodes the body of a topology block (the text between its braces).
///
/// # Errors
///
/// Returns [`PyonError::MalformedMessage`] if either the atom list or the bond
/// list is missing, or any record error from [`parse_atom`] / [`parse_bond`].
pub fn parse_topology(block: &str) -> Result<Topology, PyonError> {
    let atoms_block = list_block(block, ATOMS_HEADER, ATOMS_FOOTER, EMPTY_ATOMS)?;
    let bonds_block = list_block(block, BONDS_HEADER, BONDS_FOOTER, EMPTY_BONDS)?;
    parse_topology_parts(atoms_block, bonds_block)
}

fn list_block<'a>(
    block: &'a str,
    header: &'static str,
    footer: &'static str,
    empty_literal: &str,
) -> Result<&'a str, PyonError> {
    match between(block, header, footer) {
        Some(list) => Ok(list),
        None if block.contains(empty_literal) => Ok(""),
        None => Err(PyonError::malformed(header, footer)),
    }
}

/// Decodes the atom list and the bond list and combines them into a topology.
///
/// The two lists are disjoint inputs decoded by independent pure functions.
/// With the `parallel` feature they run as a `rayon::join` pair, otherwise one
/// after the other; the result is identical either way, and when both lists
/// are broken the atom error is the one reported.
pub fn parse_topology_parts(atoms_block: &str, bonds_block: &str) -> Result<Topology, PyonError> {
    #[cfg(feature = "parallel")]
    let (atoms, bonds) = rayon::join(|| parse_atoms(atoms_block), || parse_bonds(bonds_block));

    #[cfg(not(feature = "parallel"))]
    let (atoms, bonds) = (parse_atoms(atoms_block), parse_bonds(bonds_block));

    Ok(Topology::new(atoms?, bonds?)?)
}

/// Decodes one atom per non-blank line.
pub fn parse_atoms(block: &str) -> Result<Vec<Atom>, PyonError> {
    records(block).map(parse_atom).collect()
}

/// Decodes one bond per non-blank line.
pub fn parse_bonds(block: &str) -> Result<Vec<Bond>, PyonError> {
    records(block).map(parse_bond).collect()
}

fn records(block: &str) -> impl Iterator<Item = &str> {
    explode(block, '\n')
        .into_iter()
        .filter(|line| !trim(line, RECORD_TRIM).is_empty())
}

fn fields<'a>(line: &'a str, expected: usize) -> Result<Vec<&'a str>, PyonError> {
    let record = trim(line, RECORD_TRIM);
    let tokens = explode_and_trim(record, ',', TOKEN_TRIM);
    if tokens.len() != expected {
        return Err(PyonError::UnexpectedTokenCount {
            record: record.to_string(),
            expected,
            found: tokens.len(),
        });
    }
    Ok(tokens)
}

/// Decodes an atom record such as `["C", 6, 0.1, 1.7, 12.011],`.
///
/// Fields are positional: symbol, atomic number, charge, radius, mass. The
/// atomic number is read as an integer by truncating toward zero, so a
/// decimal token such as `-0.96` becomes `0`.
///
/// # Errors
///
/// Returns [`PyonError::UnexpectedTokenCount`] unless the record has exactly
/// five fields, and [`PyonError::NumericParse`] for a non-numeric field.
pub fn parse_atom(line: &str) -> Result<Atom, PyonError> {
    let tokens = fields(line, ATOM_FIELDS)?;
    Ok(Atom::new(
        tokens[0],
        parse_truncated_int("atomic number", tokens[1])?,
        parse_float("charge", tokens[2])?,
        parse_float("radius", tokens[3])?,
        parse_float("mass", tokens[4])?,
    ))
}

/// Decodes a bond record such as `[2356, 2358],`.
///
/// # Errors
///
/// Returns [`PyonError::UnexpectedTokenCount`] unless the record has exactly
/// two fields, and [`PyonError::NumericParse`] unless both are non-negative
/// integers.
pub fn parse_bond(line: &str) -> Result<Bond, PyonError> {
    let tokens = fields(line, BOND_FIELDS)?;
    let atom_a = tokens[0]
        .parse()
        .map_err(|_| PyonError::numeric("bond atom index", tokens[0]))?;
    let atom_b = tokens[1]
        .parse()
        .map_err(|_| PyonError::numeric("bond atom index", tokens[1]))?;
    Ok(Bond::new(atom_a, atom_b))
}

/// Decodes the body of a positions block: a sequence of `[x, y, z]` triples.
///
/// # Errors
///
/// Returns [`PyonError::UnexpectedTokenCount`] for a triple without exactly
/// three coordinates and [`PyonError::NumericParse`] for a non-numeric one.
pub fn parse_snapshot(block: &str) -> Result<Snapshot, PyonError> {
    let mut snapshot = Snapshot::default();
    let mut cursor = 0;
    while let Some(span) = between_span(block, "[", "]", cursor) {
        snapshot.push(parse_position(&block[span.clone()])?);
        cursor = span.end;
    }
    Ok(snapshot)
}

fn parse_position(triple: &str) -> Result<Point3<f64>, PyonError> {
    let tokens: Vec<&str> = triple
        .split([',', '\n'])
        .map(|token| trim(token, TOKEN_TRIM))
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.len() != POSITION_FIELDS {
        return Err(PyonError::UnexpectedTokenCount {
            record: triple.trim().to_string(),
            expected: POSITION_FIELDS,
            found: tokens.len(),
        });
    }
    Ok(Point3::new(
        parse_float("x coordinate", tokens[0])?,
        parse_float("y coordinate", tokens[1])?,
        parse_float("z coordinate", tokens[2])?,
    ))
}

/// Extracts every slot id from a `slot-info` response.
///
/// Each id is the text between a literal `"id":` and the next `,\n`, with
/// whitespace and quotes removed (the daemon sends ids such as `"00"`).
///
/// # Errors
///
/// Returns [`PyonError::NumericParse`] if an id is not a non-negative integer.
pub fn parse_slot_ids(text: &str) -> Result<Vec<u32>, PyonError> {
    let mut ids = Vec::new();
    let mut cursor = 0;
    while let Some(span) = between_span(text, SLOT_ID_KEY, SLOT_ID_TERMINATOR, cursor) {
        let token = trim(&text[span.clone()], TOKEN_TRIM);
        ids.push(
            token
                .parse()
                .map_err(|_| PyonError::numeric("slot id", token))?,
        );
        cursor = span.end;
    }
    Ok(ids)
}

/// Parses a finite decimal. `NaN` and the infinities are rejected.
fn parse_float(field: &'static str, token: &str) -> Result<f64, PyonError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| PyonError::numeric(field, token))
}

fn parse_truncated_int(field: &'static str, token: &str) -> Result<i32, PyonError> {
    if let Ok(value) = token.parse::<i32>() {
        return Ok(value);
    }
    let value = parse_float(field, token)?.trunc();
    if value < f64::from(i32::MIN) || value > f64::from(i32::MAX) {
        return Err(PyonError::numeric(field, token));
    }
    Ok(value as i32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::io::fixtures::TWO_SNAPSHOT_DOCUMENT;

    #[test]
    fn parse_atom_maps_fields_positionally_and_truncates_atomic_number() {
        let atom = parse_atom("[\"N\", -0.96, 1.7063, 14.007, 7],").unwrap();
        assert_eq!(atom, Atom::new("N", 0, 1.7063, 14.007, 7.0));
    }

    #[test]
    fn parse_atom_accepts_last_line_without_brackets() {
        let atom = parse_atom("    [\"O\", 8, -0.5, 1.52, 15.999").unwrap();
        assert_eq!(atom.symbol, "O");
        assert_eq!(atom.atomic_number, 8);
        assert_eq!(atom.mass, 15.999);
    }

    #[test]
    fn parse_atom_rejects_non_numeric_field() {
        let result = parse_atom("[\"N\", 7, abc, 1.5, 14.0],");
        assert_eq!(
            result,
            Err(PyonError::NumericParse {
                field: "charge",
                value: "abc".to_string(),
            })
        );
    }

    #[test]
    fn parse_atom_rejects_partial_number() {
        assert!(matches!(
            parse_atom("[\"N\", 7x, 0.1, 1.5, 14.0]"),
            Err(PyonError::NumericParse {
                field: "atomic number",
                ..
            })
        ));
        assert!(matches!(
            parse_atom("[\"N\", 7, 0.1, 1.5.2, 14.0]"),
            Err(PyonError::NumericParse { field: "radius", .. })
        ));
    }

    #[test]
    fn parse_atom_rejects_wrong_field_count() {
        assert!(matches!(
            parse_atom("[\"N\", 7, 0.1, 1.5],"),
            Err(PyonError::UnexpectedTokenCount {
                expected: 5,
                found: 4,
                ..
            })
        ));
    }

    #[test]
    fn parse_bond_reads_two_indices() {
        assert_eq!(parse_bond("[2356, 2358],").unwrap(), Bond::new(2356, 2358));
        assert_eq!(parse_bond("    [2, 3").unwrap(), Bond::new(2, 3));
    }

    #[test]
    fn parse_bond_rejects_negative_and_decimal_indices() {
        assert!(matches!(
            parse_bond("[-1, 2],"),
            Err(PyonError::NumericParse { .. })
        ));
        assert!(matches!(
            parse_bond("[1.5, 2],"),
            Err(PyonError::NumericParse { .. })
        ));
    }

    #[test]
    fn parse_snapshot_keeps_encounter_order() {
        let snapshot = parse_snapshot("\n  [1.5, -2.0, 3.25],\n  [4.0, 5.0, 6.0]\n").unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.position(0).unwrap(), &Point3::new(1.5, -2.0, 3.25));
        assert_eq!(snapshot.position(1).unwrap(), &Point3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn parse_snapshot_accepts_newline_separated_coordinates() {
        let snapshot = parse_snapshot("[\n 1.0,\n 2.0,\n 3.0\n]").unwrap();
        assert_eq!(snapshot.position(0).unwrap(), &Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn parse_snapshot_rejects_incomplete_triple() {
        assert!(matches!(
            parse_snapshot("[1.0, 2.0]"),
            Err(PyonError::UnexpectedTokenCount {
                expected: 3,
                found: 2,
                ..
            })
        ));
    }

    #[test]
    fn parse_snapshot_rejects_non_finite_coordinates() {
        for token in ["NaN", "inf", "-infinity"] {
            assert_eq!(
                parse_snapshot(&format!("[0.0, {}, 0.0]", token)),
                Err(PyonError::NumericParse {
                    field: "y coordinate",
                    value: token.to_string(),
                })
            );
        }
    }

    #[test]
    fn parse_atom_rejects_non_finite_fields() {
        assert_eq!(
            parse_atom(r#"["C", 6, nan, 1.7, 12.011],"#),
            Err(PyonError::NumericParse {
                field: "charge",
                value: "nan".to_string(),
            })
        );
        assert_eq!(
            parse_atom(r#"["C", 6, 0.0, inf, 12.011],"#),
            Err(PyonError::NumericParse {
                field: "radius",
                value: "inf".to_string(),
            })
        );
        assert_eq!(
            parse_atom(r#"["C", Infinity, 0.0, 1.7, 12.011],"#),
            Err(PyonError::NumericParse {
                field: "atomic number",
                value: "Infinity".to_string(),
            })
        );
    }

    #[test]
    fn parse_snapshot_of_empty_block_is_empty() {
        assert!(parse_snapshot("\n").unwrap().is_empty());
    }

    #[test]
    fn parse_decodes_full_document() {
        let trajectory = parse(TWO_SNAPSHOT_DOCUMENT).unwrap();

        assert_eq!(trajectory.topology().atoms().len(), 4);
        assert_eq!(trajectory.topology().bonds().len(), 3);
        assert_eq!(trajectory.count_snapshots(), 2);
        for snapshot in trajectory.snapshots() {
            assert_eq!(snapshot.len(), 4);
        }

        assert_eq!(trajectory.topology().atoms()[3].symbol, "O");
        assert_eq!(trajectory.topology().bonds()[2], Bond::new(2, 3));
        assert_eq!(
            trajectory.snapshot(1).unwrap().position(3).unwrap(),
            &Point3::new(3.8, 1.3, 0.2)
        );
    }

    #[test]
    fn parse_without_topology_is_malformed() {
        let result = parse("PyON 1 positions\n[\n  [0.0, 0.0, 0.0]\n]\n---\n");
        assert_eq!(
            result,
            Err(PyonError::MalformedMessage {
                header: TOPOLOGY_HEADER,
                footer: TOPOLOGY_FOOTER,
            })
        );
    }

    #[test]
    fn parse_rejects_snapshot_with_wrong_atom_count() {
        let document = TWO_SNAPSHOT_DOCUMENT.replace("  [3.8, 1.3, 0.2]\n", "");
        let document = document.replace("  [2.6, 1.3, 0.0],\n", "  [2.6, 1.3, 0.0]\n");
        assert_eq!(
            parse(&document),
            Err(PyonError::Model(ModelError::SnapshotLengthMismatch {
                expected: 4,
                found: 3,
            }))
        );
    }

    #[test]
    fn parse_rejects_bond_to_missing_atom() {
        let document = TWO_SNAPSHOT_DOCUMENT.replace("[2, 3]\n", "[2, 9]\n");
        assert!(matches!(
            parse(&document),
            Err(PyonError::Model(ModelError::BondOutOfRange { atom_b: 9, .. }))
        ));
    }

    #[test]
    fn parse_topology_requires_both_lists() {
        let block = "  \"atoms\": [\n    [\"C\", 6, 0.0, 1.7, 12.0]\n  ],\n";
        assert_eq!(
            parse_topology(block),
            Err(PyonError::MalformedMessage {
                header: BONDS_HEADER,
                footer: BONDS_FOOTER,
            })
        );
    }

    #[test]
    fn parse_topology_accepts_empty_list_literals() {
        let topology = parse_topology("  \"atoms\": [],\n  \"bonds\": []").unwrap();
        assert!(topology.is_empty());
        assert_eq!(topology.bond_count(), 0);
    }

    #[test]
    fn parse_topology_parts_reports_atom_error_first() {
        let result = parse_topology_parts("[\"C\", x, 0, 0, 0]", "[a, b]");
        assert!(matches!(
            result,
            Err(PyonError::NumericParse {
                field: "atomic number",
                ..
            })
        ));
    }

    #[test]
    fn parse_topology_parts_is_deterministic() {
        let atoms = "[\"C\", 6, 0, 1.7, 12],\n[\"H\", 1, 0, 1.1, 1]";
        let bonds = "[0, 1]";
        let first = parse_topology_parts(atoms, bonds).unwrap();
        for _ in 0..8 {
            assert_eq!(parse_topology_parts(atoms, bonds).unwrap(), first);
        }
        assert_eq!(first.atoms()[1].symbol, "H");
    }

    #[test]
    fn parse_slot_ids_reads_quoted_and_bare_ids() {
        let text = concat!(
            "PyON 1 slots\n",
            "[\n",
            "  {\n",
            "    \"id\": \"00\",\n",
            "    \"status\": \"RUNNING\",\n",
            "  },\n",
            "  {\n",
            "    \"id\": 1,\n",
            "    \"status\": \"READY\",\n",
            "  }\n",
            "]\n",
            "---\n",
            "> "
        );
        assert_eq!(parse_slot_ids(text).unwrap(), vec![0, 1]);
    }

    #[test]
    fn parse_slot_ids_without_ids_is_empty() {
        assert!(parse_slot_ids("> ").unwrap().is_empty());
    }

    #[test]
    fn parse_slot_ids_rejects_non_numeric_id() {
        assert_eq!(
            parse_slot_ids("\"id\": \"gpu\",\n"),
            Err(PyonError::NumericParse {
                field: "slot id",
                value: "gpu".to_string(),
            })
        );
    }
}
