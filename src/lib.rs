//! Order independent comparison of netlist exports.
//!
//! A netlist is read into a [`Design`], which carries a canonical
//! [`Fingerprint`] of its component/pin to net wiring. Two designs can be
//! checked for equivalence by fingerprint, or diffed into a report with
//! [`compare`].

use std::{
    collections::BTreeMap,
    hash::{Hash, Hasher},
    path::{Path, PathBuf},
};

mod diff;
mod error;
mod fingerprint;
mod parse;
mod record;

pub use diff::{compare, compare_to_file, diff, write_report, Difference};
pub use error::{Error, ParseError, Result};
pub use fingerprint::Fingerprint;
pub use parse::RecordKind;
pub use record::{Record, Records};

/// One pin of one component and the net it connects to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub component: String,
    pub pin: String,
    pub net: String,
}

/// A net and its descriptive signal name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Net {
    pub name: String,
    pub full_signal_name: String,
}

/// Pins of a single component, keyed by pin name
pub type Pins = BTreeMap<String, Node>;

/// All components of a design, keyed by reference designator
pub type Components = BTreeMap<String, Pins>;

/// A parsed netlist.
///
/// Designs are immutable once parsed. Equality and hashing go through the
/// fingerprint, so two designs with the same wiring compare equal even when
/// their net aliases or source files differ.
#[derive(Debug, Clone)]
pub struct Design {
    components: Components,
    nets: BTreeMap<String, Net>,
    source_path: PathBuf,
    fingerprint: Fingerprint,
}

impl Design {
    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn component(&self, name: &str) -> Option<&Pins> {
        self.components.get(name)
    }

    pub fn node(&self, component: &str, pin: &str) -> Option<&Node> {
        self.component(component)?.get(pin)
    }

    pub fn nets(&self) -> &BTreeMap<String, Net> {
        &self.nets
    }

    pub fn net(&self, name: &str) -> Option<&Net> {
        self.nets.get(name)
    }

    /// Total number of component pins
    pub fn node_count(&self) -> usize {
        self.components.values().map(BTreeMap::len).sum()
    }

    pub fn source_path(&self) -> &Path {
        &self.source_path
    }

    pub fn fingerprint(&self) -> Fingerprint {
        self.fingerprint
    }
}

impl PartialEq for Design {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for Design {}

impl Hash for Design {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

/// Read and parse the netlist at `path`.
pub fn load_design(path: impl AsRef<Path>) -> Result<Design> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| Error::FileAccess {
        path: path.to_owned(),
        source,
    })?;
    // Exports may carry codepage bytes in records that are skipped anyway
    let text = String::from_utf8_lossy(&bytes);
    let design = Design::parse(path, &text).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })?;
    log::info!(
        "loaded {}: {} components, {} pins, {} nets",
        path.display(),
        design.components.len(),
        design.node_count(),
        design.nets.len()
    );
    Ok(design)
}
