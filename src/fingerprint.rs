use std::{collections::BTreeMap, fmt::Display};

use crate::Components;

/// Canonical MD5 digest of a design's component/pin to net wiring.
///
/// Keys `<component>.<pin>` are sorted bytewise and each is fed to the
/// digest followed by its net name, with no separators. Net aliases do not
/// take part.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Fingerprint([u8; 16]);

impl Fingerprint {
    pub fn of(components: &Components) -> Self {
        let flat: BTreeMap<String, &str> = components
            .iter()
            .flat_map(|(component, pins)| {
                pins.iter()
                    .map(move |(pin, node)| (format!("{component}.{pin}"), node.net.as_str()))
            })
            .collect();

        let mut context = md5::Context::new();
        for (key, net) in &flat {
            context.consume(key.as_bytes());
            context.consume(net.as_bytes());
        }
        Fingerprint(context.compute().0)
    }
}

impl Display for Fingerprint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}
