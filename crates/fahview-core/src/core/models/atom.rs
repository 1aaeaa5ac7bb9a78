use phf::{Map, phf_map};

/// An RGB colour with components in `[0, 1]`.
pub type Rgb = [f32; 3];

const UNKNOWN_PINK: Rgb = [1.0, 0.08, 0.58];

/// CPK colours keyed by the uppercased first character of the element symbol.
static CPK_COLORS: Map<char, Rgb> = phf_map! {
    'C' => [0.56, 0.56, 0.56],
    'H' => [1.0, 1.0, 1.0],
    'N' => [0.19, 0.31, 0.97],
    'O' => [1.0, 0.05, 0.05],
    'S' => [1.0, 0.78, 0.2],
    'P' => [1.0, 0.5, 0.0],
};

/// Represents one atom of a simulated molecule.
///
/// The fields are decoded positionally from the daemon's topology message and
/// never change afterwards. Properties that only depend on the element (the
/// display colour and the number of electron shells) are derived on demand
/// from the first character of the symbol instead of being stored.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// The element symbol as sent by the daemon (e.g., "C", "N", "O").
    pub symbol: String,
    /// The atomic number field of the topology record.
    pub atomic_number: i32,
    /// The partial charge in elementary charge units.
    pub charge: f64,
    /// The atomic radius in the daemon's length unit.
    pub radius: f64,
    /// The atomic mass in daltons.
    pub mass: f64,
}

impl Atom {
    /// Creates a new `Atom` from its decoded fields.
    ///
    /// # Arguments
    ///
    /// * `symbol` - The element symbol.
    /// * `atomic_number` - The atomic number field.
    /// * `charge` - The partial charge.
    /// * `radius` - The atomic radius.
    /// * `mass` - The atomic mass.
    pub fn new(symbol: &str, atomic_number: i32, charge: f64, radius: f64, mass: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            atomic_number,
            charge,
            radius,
            mass,
        }
    }

    fn element_char(&self) -> Option<char> {
        self.symbol.chars().next().map(|c| c.to_ascii_uppercase())
    }

    /// Returns the CPK display colour keyed by the first character of the symbol.
    pub fn color(&self) -> Rgb {
        self.element_char()
            .and_then(|c| CPK_COLORS.get(&c).copied())
            .unwrap_or(UNKNOWN_PINK)
    }

    /// Returns the number of occupied electron shells keyed by the first
    /// character of the symbol.
    ///
    /// Only the elements that occur in proteins and nucleic acids are known;
    /// anything else reports a single shell.
    pub fn shell_count(&self) -> u8 {
        match self.element_char() {
            Some('C' | 'N' | 'O') => 2,
            Some('S' | 'P') => 3,
            _ => 1,
        }
    }
}
