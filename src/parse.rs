use std::{collections::BTreeMap, path::Path};

use crate::{
    fingerprint::Fingerprint,
    record::{Record, Records},
    Components, Design, Net, Node, ParseError,
};

const NODE_MARKER: &str = "NODE_NAME";
const NET_MARKER: &str = "NET_NAME";
const SIGNAL_PREFIX: &str = "C_SIGNAL=";

/// What a record describes, decided from its first line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    Unrecognized,
    Node,
    Net,
}

impl RecordKind {
    pub fn classify(record: &Record) -> Self {
        let head = record.head();
        if head.contains(NODE_MARKER) {
            Self::Node
        } else if head.contains(NET_MARKER) {
            Self::Net
        } else {
            Self::Unrecognized
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Unrecognized => "unrecognized",
            Self::Node => "node",
            Self::Net => "net",
        }
    }
}

fn line<'a>(record: &Record<'a>, kind: RecordKind, index: usize) -> Result<&'a str, ParseError> {
    record.get(index).ok_or_else(|| ParseError::MissingLine {
        kind: kind.name(),
        index,
        line: record.line_number(),
        record: record.raw(),
    })
}

impl<'a> TryFrom<&Record<'a>> for Node {
    type Error = ParseError;

    fn try_from(record: &Record<'a>) -> Result<Self, Self::Error> {
        let node_ref = line(record, RecordKind::Node, 1)?;
        let net = line(record, RecordKind::Node, 3)?;

        let mut tokens = node_ref.split_whitespace();
        let (Some(component), Some(pin), None) = (tokens.next(), tokens.next(), tokens.next())
        else {
            return Err(ParseError::BadNodeRef {
                line: record.line_number(),
                found: node_ref.to_owned(),
                record: record.raw(),
            });
        };
        let net = net.replace(['\'', ':'], "").trim().to_owned();

        Ok(Node {
            component: component.to_owned(),
            pin: pin.to_owned(),
            net,
        })
    }
}

impl<'a> TryFrom<&Record<'a>> for Net {
    type Error = ParseError;

    fn try_from(record: &Record<'a>) -> Result<Self, Self::Error> {
        let name = line(record, RecordKind::Net, 1)?;
        let signal = line(record, RecordKind::Net, 3)?;

        let name = name.trim().trim_matches('\'').to_owned();
        let full_signal_name = signal
            .replace(SIGNAL_PREFIX, "")
            .trim()
            .trim_matches('\'')
            .to_owned();

        Ok(Net {
            name,
            full_signal_name,
        })
    }
}

impl Design {
    /// Build a design from netlist text. `source_path` is only recorded.
    pub fn parse(source_path: impl AsRef<Path>, text: &str) -> Result<Self, ParseError> {
        let mut components = Components::new();
        let mut nets = BTreeMap::new();
        let mut skipped = 0usize;

        for record in Records::new(text) {
            match RecordKind::classify(&record) {
                RecordKind::Node => {
                    let node = Node::try_from(&record)?;
                    components
                        .entry(node.component.clone())
                        .or_insert_with(BTreeMap::new)
                        .insert(node.pin.clone(), node);
                }
                RecordKind::Net => {
                    let net = Net::try_from(&record)?;
                    nets.insert(net.name.clone(), net);
                }
                RecordKind::Unrecognized => skipped += 1,
            }
        }

        let fingerprint = Fingerprint::of(&components);
        log::debug!(
            "{}: skipped {skipped} unrecognized records, fingerprint {fingerprint}",
            source_path.as_ref().display()
        );

        Ok(Design {
            components,
            nets,
            source_path: source_path.as_ref().to_owned(),
            fingerprint,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn record(text: &str) -> Record<'_> {
        Records::new(text).next().unwrap()
    }

    #[rstest]
    #[case("NODE_NAME\tR1 1\n\n'NET1':", RecordKind::Node)]
    #[case("{ hdr }\n NODE_NAME \nR1 1", RecordKind::Node)]
    #[case("NET_NAME\n'N1'\n\nC_SIGNAL='X'", RecordKind::Net)]
    #[case("PART_NAME\nR1 'RES':", RecordKind::Unrecognized)]
    #[case("", RecordKind::Unrecognized)]
    #[case("R1 1\nNODE_NAME", RecordKind::Unrecognized)]
    fn classify(#[case] input: &str, #[case] expected: RecordKind) {
        assert_eq!(RecordKind::classify(&record(input)), expected);
    }

    #[rstest]
    #[case("NODE_NAME\tR1 1\n\n'NET1':", "R1", "1", "NET1")]
    #[case("NODE_NAME\nU3  A4\n 'U3' 'A4':\n ' GND_D ':", "U3", "A4", "GND_D")]
    #[case("NODE_NAME\tJ1 2\n'J1' '2':\t'N:0:1'", "J1", "2", "N01")]
    fn node_record(
        #[case] input: &str,
        #[case] component: &str,
        #[case] pin: &str,
        #[case] net: &str,
    ) {
        let node = Node::try_from(&record(input)).unwrap();
        assert_eq!(node.component, component);
        assert_eq!(node.pin, pin);
        assert_eq!(node.net, net);
    }

    #[rstest]
    #[case("NET_NAME\n'N00012'\n'N00012':\nC_SIGNAL='/CPU/RESET_N'", "N00012", "/CPU/RESET_N")]
    #[case("NET_NAME\tGND\n'GND':\n C_SIGNAL= GND ", "GND", "GND")]
    #[case("NET_NAME\n'N1'\n\nC_SIGNAL=''", "N1", "")]
    #[case("NET_NAME\n 'N1' \n\nC_SIGNAL=''", "N1", "")]
    fn net_record(#[case] input: &str, #[case] name: &str, #[case] full: &str) {
        let net = Net::try_from(&record(input)).unwrap();
        assert_eq!(net.name, name);
        assert_eq!(net.full_signal_name, full);
    }

    #[rstest]
    #[case("NODE_NAME\nR1\n\n'N1':")]
    #[case("NODE_NAME\nR1 1 2\n\n'N1':")]
    fn bad_node_ref(#[case] input: &str) {
        let err = Node::try_from(&record(input)).unwrap_err();
        assert!(matches!(err, ParseError::BadNodeRef { .. }));
    }

    #[test]
    fn short_records_report_missing_line() {
        let err = Node::try_from(&record("\nNODE_NAME\nR1 1")).unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingLine {
                kind: "node",
                index: 3,
                line: 2,
                record: "NODE_NAME\nR1 1".to_owned(),
            }
        );

        let err = Net::try_from(&record("NET_NAME")).unwrap_err();
        assert!(matches!(err, ParseError::MissingLine { index: 1, .. }));
    }

    #[test]
    fn later_records_overwrite_earlier_ones() {
        let text = "NODE_NAME\tR1 1\n\n'FIRST':;\
                    NET_NAME\n'N1'\n\nC_SIGNAL='OLD';\
                    NODE_NAME\tR1 1\n\n'SECOND':;\
                    NET_NAME\n'N1'\n\nC_SIGNAL='NEW'";
        let design = Design::parse("dup.net", text).unwrap();
        assert_eq!(design.node_count(), 1);
        assert_eq!(design.node("R1", "1").unwrap().net, "SECOND");
        assert_eq!(design.nets().len(), 1);
        assert_eq!(design.net("N1").unwrap().full_signal_name, "NEW");
    }

    #[test]
    fn unrecognized_records_are_skipped() {
        let text = "{ OrCAD export }\nPART_NAME\nR1 'RES':;\n;garbage here;NODE_NAME\tR1 1\n\n'N1':;";
        let design = Design::parse("skip.net", text).unwrap();
        assert_eq!(design.components().len(), 1);
        assert!(design.nets().is_empty());
    }

    #[test]
    fn dangling_net_references_are_allowed() {
        let design = Design::parse("d.net", "NODE_NAME\tR1 1\n\n'NOWHERE':").unwrap();
        assert_eq!(design.node("R1", "1").unwrap().net, "NOWHERE");
        assert!(design.net("NOWHERE").is_none());
    }

    #[test]
    fn first_bad_record_aborts_parse() {
        let text = "NODE_NAME\tR1 1\n\n'N1':;NODE_NAME\nR2\n\n'N2':;NODE_NAME\tR3 1\n\n'N3':";
        let err = Design::parse("bad.net", text).unwrap_err();
        let ParseError::BadNodeRef { found, .. } = err else {
            panic!("expected BadNodeRef, got {err:?}");
        };
        assert_eq!(found, "R2");
    }
}
