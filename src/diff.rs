use std::{
    fmt::Display,
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

use crate::{Design, Error, Result};

const SEPARATOR: &str = "--------------------------------";

/// A structural difference between design A and design B
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Difference<'a> {
    /// The pin exists on both sides but connects to different nets
    NetDiff {
        component: &'a str,
        pin: &'a str,
        a: &'a str,
        b: &'a str,
    },
    /// The component exists in B but lacks this pin of A
    PinMissing { component: &'a str, pin: &'a str },
    /// The component does not exist in B
    CompMissing { component: &'a str },
    /// The component exists only in B
    ExtraComp { component: &'a str },
}

impl<'a> Display for Difference<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difference::NetDiff {
                component,
                pin,
                a,
                b,
            } => write!(f, "{component}.{pin}, NET DIFF, {a}, {b}"),
            Difference::PinMissing { component, pin } => {
                write!(f, "{component}, COMP PIN MISSING, {pin}, NONE")
            }
            Difference::CompMissing { component } => {
                write!(f, "{component}, COMP MISSING, {component}, NONE")
            }
            Difference::ExtraComp { component } => {
                write!(f, "{component}, EXTRA COMP, NONE, {component}")
            }
        }
    }
}

/// Differences from `a` to `b`, in report order.
///
/// Pins are only checked from A to B: a pin that exists only on B's side of
/// a shared component is not reported.
pub fn diff<'a>(a: &'a Design, b: &'a Design) -> Vec<Difference<'a>> {
    let mut diffs = Vec::new();

    for (component, pins) in a.components() {
        let Some(other) = b.component(component) else {
            diffs.push(Difference::CompMissing { component });
            continue;
        };
        for (pin, node) in pins {
            match other.get(pin) {
                Some(theirs) if theirs.net != node.net => diffs.push(Difference::NetDiff {
                    component,
                    pin,
                    a: &node.net,
                    b: &theirs.net,
                }),
                Some(_) => {}
                None => diffs.push(Difference::PinMissing { component, pin }),
            }
        }
    }

    for component in b.components().keys() {
        if a.component(component).is_none() {
            diffs.push(Difference::ExtraComp { component });
        }
    }

    diffs
}

/// Write the comparison report for already computed differences.
pub fn write_report<W: Write>(
    a: &Design,
    b: &Design,
    diffs: &[Difference],
    mut sink: W,
) -> io::Result<()> {
    writeln!(sink, "A: {}, ({})", a.fingerprint(), a.source_path().display())?;
    writeln!(sink, "B: {}, ({})", b.fingerprint(), b.source_path().display())?;
    writeln!(sink, "{SEPARATOR}")?;
    writeln!(sink, "INDEX, REF, DIFF, A, B")?;
    for (index, diff) in diffs.iter().enumerate() {
        writeln!(sink, "{index:03}, {diff}")?;
    }
    writeln!(sink, "{SEPARATOR}")?;
    write!(sink, "{} differences found", diffs.len())?;
    sink.flush()
}

/// Compare `a` against `b`, writing the report to `sink`.
///
/// Returns the number of differences found.
pub fn compare<W: Write>(a: &Design, b: &Design, sink: W) -> io::Result<usize> {
    let diffs = diff(a, b);
    log::debug!(
        "{} differences between {} and {}",
        diffs.len(),
        a.fingerprint(),
        b.fingerprint()
    );
    write_report(a, b, &diffs, sink)?;
    Ok(diffs.len())
}

/// Like [`compare`], creating or truncating the report file at `path`.
pub fn compare_to_file(a: &Design, b: &Design, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file_error = |source| Error::FileAccess {
        path: path.to_owned(),
        source,
    };
    let file = File::create(path).map_err(file_error)?;
    compare(a, b, BufWriter::new(file)).map_err(file_error)
}
