//! Reference genome identifiers: alias resolution and chromosome bounds.

use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Canonical genome identifier as passed to the viewer's `genome` command.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Genome(String);

impl Genome {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Genome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

const BUILTIN_ALIASES: &[(&str, &[&str])] = &[
    ("hg19", &["GRCh37", "b37"]),
    ("hg38", &["GRCh38", "b38"]),
    ("mm10", &["GRCm38"]),
    ("mm39", &["GRCm39"]),
];

/// One canonical genome with the names that resolve to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenomeEntry {
    pub canonical: String,
    pub aliases: Vec<String>,
}

/// Alias table mapping friendly names to canonical identifiers. Lookup ignores case.
#[derive(Debug, Clone)]
pub struct GenomeAliases {
    /// lowercase alias -> (alias as written, canonical)
    aliases: BTreeMap<String, (String, String)>,
}

impl Default for GenomeAliases {
    fn default() -> Self {
        Self::builtin()
    }
}

impl GenomeAliases {
    pub fn builtin() -> Self {
        let mut aliases = BTreeMap::new();
        for (canonical, names) in BUILTIN_ALIASES {
            for name in names.iter() {
                aliases.insert(
                    name.to_ascii_lowercase(),
                    ((*name).to_string(), (*canonical).to_string()),
                );
            }
        }
        Self { aliases }
    }

    /// Built-in table with `overrides` (alias -> canonical) merged on top.
    pub fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut table = Self::builtin();
        for (alias, canonical) in overrides {
            table.aliases.insert(
                alias.to_ascii_lowercase(),
                (alias.clone(), canonical.clone()),
            );
        }
        table
    }

    /// Resolve a name; unknown names pass through unchanged.
    pub fn resolve(&self, name: &str) -> Genome {
        let name = name.trim();
        Genome(
            self.aliases
                .get(&name.to_ascii_lowercase())
                .map(|(_, canonical)| canonical.clone())
                .unwrap_or_else(|| name.to_string()),
        )
    }

    /// Canonical genomes with their aliases, sorted by canonical name.
    pub fn listing(&self) -> Vec<GenomeEntry> {
        let mut grouped: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for (canonical, _) in BUILTIN_ALIASES {
            grouped.entry(*canonical).or_default();
        }
        for (alias, canonical) in self.aliases.values() {
            grouped
                .entry(canonical.as_str())
                .or_default()
                .push(alias.clone());
        }
        grouped
            .into_iter()
            .map(|(canonical, aliases)| GenomeEntry {
                canonical: canonical.to_string(),
                aliases,
            })
            .collect()
    }
}

/// Chromosome lengths keyed by name without the `chr` prefix.
#[derive(Debug, Clone)]
pub struct ChromSizes {
    sizes: HashMap<&'static str, u64>,
}

impl ChromSizes {
    pub fn get(&self, chrom: &str) -> Option<u64> {
        let key = chrom.strip_prefix("chr").unwrap_or(chrom);
        self.sizes.get(key).copied()
    }
}

const HG19_SIZES: &[(&str, u64)] = &[
    ("1", 249_250_621),
    ("2", 242_951_149),
    ("3", 198_022_430),
    ("4", 191_154_276),
    ("5", 180_915_260),
    ("6", 171_115_067),
    ("7", 159_138_663),
    ("8", 146_364_022),
    ("9", 141_213_431),
    ("10", 135_534_747),
    ("11", 135_006_516),
    ("12", 133_851_895),
    ("13", 115_169_878),
    ("14", 107_349_540),
    ("15", 102_531_392),
    ("16", 90_354_753),
    ("17", 81_195_210),
    ("18", 78_077_248),
    ("19", 59_128_983),
    ("20", 63_025_520),
    ("21", 48_129_895),
    ("22", 51_304_566),
    ("X", 155_270_560),
    ("Y", 59_373_566),
    ("M", 16_569),
];

const HG38_SIZES: &[(&str, u64)] = &[
    ("1", 248_956_422),
    ("2", 242_193_529),
    ("3", 198_295_559),
    ("4", 190_214_555),
    ("5", 181_538_259),
    ("6", 170_805_979),
    ("7", 159_345_973),
    ("8", 145_138_636),
    ("9", 138_394_717),
    ("10", 133_797_422),
    ("11", 135_086_622),
    ("12", 133_275_309),
    ("13", 114_364_328),
    ("14", 107_043_718),
    ("15", 101_991_189),
    ("16", 90_338_345),
    ("17", 83_257_441),
    ("18", 80_373_285),
    ("19", 58_617_616),
    ("20", 64_444_167),
    ("21", 46_709_983),
    ("22", 50_818_468),
    ("X", 156_040_895),
    ("Y", 57_227_415),
    ("M", 16_569),
];

/// Known chromosome sizes for a canonical genome, if any.
pub fn chromosome_sizes(genome: &Genome) -> Option<ChromSizes> {
    let table = match genome.as_str() {
        "hg19" => HG19_SIZES,
        "hg38" => HG38_SIZES,
        _ => return None,
    };
    Some(ChromSizes {
        sizes: table.iter().copied().collect(),
    })
}
