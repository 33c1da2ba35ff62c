//=========================================================================
// Generators
//=========================================================================
//
// Purchasable units that permanently raise the generation rate.
//
// Pricing:
//   price(owned) = floor(base_price * growth^owned)
//
// The price is always recomputed from the base price and the current
// owned count so long purchase runs cannot drift.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::EconomyError;

//=== Constants ===========================================================

/// Multiplicative price growth per owned unit.
pub const DEFAULT_PRICE_GROWTH: f64 = 1.15;

/// Index of a generator in its catalog.
pub type GeneratorId = usize;

//=== GeneratorSpec =======================================================

/// Static catalog entry a [`Generator`] is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSpec {
    pub name: String,
    pub description: String,
    pub base_price: u64,
    pub rate_per_unit: u64,
    pub unlock_threshold: u64,
}

impl GeneratorSpec {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        base_price: u64,
        rate_per_unit: u64,
        unlock_threshold: u64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            base_price,
            rate_per_unit,
            unlock_threshold,
        }
    }
}

/// The five fixed charges of the stock game.
pub fn default_catalog() -> Vec<GeneratorSpec> {
    vec![
        GeneratorSpec::new("Food", "I'm getting hungry.", 10, 1, 10),
        GeneratorSpec::new("Phone", "Call me maybe.", 97, 11, 20),
        GeneratorSpec::new("Utilities", "Unlimited power!", 890, 150, 97),
        GeneratorSpec::new("Car loan", "Money goes vrooom.", 13_059, 2_000, 890),
        GeneratorSpec::new("Mortgage", "Sign here, here, here!", 147_923, 12_000, 13_059),
    ]
}

//=== Generator ===========================================================

/// Live generator state for one round.
#[derive(Debug, Clone, PartialEq)]
pub struct Generator {
    id: GeneratorId,
    name: String,
    description: String,
    base_price: u64,
    price: u64,
    rate_per_unit: u64,
    unlock_threshold: u64,
    owned: u32,
    total_generated: u64,
    visible: bool,
    pub(crate) reveal: f32,
}

impl Generator {
    /// Builds a hidden, unowned generator from its catalog entry.
    pub fn from_spec(id: GeneratorId, spec: &GeneratorSpec) -> Self {
        Self {
            id,
            name: spec.name.clone(),
            description: spec.description.clone(),
            base_price: spec.base_price,
            price: spec.base_price,
            rate_per_unit: spec.rate_per_unit,
            unlock_threshold: spec.unlock_threshold,
            owned: 0,
            total_generated: 0,
            visible: false,
            reveal: 0.0,
        }
    }

    /// `floor(base_price * growth^owned)`, or an overflow error.
    pub fn price_for(base_price: u64, owned: u32, growth: f64) -> Result<u64, EconomyError> {
        let exponent = i32::try_from(owned).map_err(|_| EconomyError::Overflow("price"))?;
        let raw = (base_price as f64 * growth.powi(exponent)).floor();

        if !raw.is_finite() || raw < 0.0 || raw >= u64::MAX as f64 {
            return Err(EconomyError::Overflow("price"));
        }

        Ok(raw as u64)
    }

    //--- Accessors --------------------------------------------------------

    pub fn id(&self) -> GeneratorId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn base_price(&self) -> u64 {
        self.base_price
    }

    pub fn price(&self) -> u64 {
        self.price
    }

    pub fn rate_per_unit(&self) -> u64 {
        self.rate_per_unit
    }

    pub fn unlock_threshold(&self) -> u64 {
        self.unlock_threshold
    }

    pub fn owned(&self) -> u32 {
        self.owned
    }

    /// Lifetime output of this generator, for display.
    pub fn total_generated(&self) -> u64 {
        self.total_generated
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Reveal animation progress in `[0, 1]`.
    pub fn reveal(&self) -> f32 {
        self.reveal
    }

    /// Current contribution per second (`rate_per_unit * owned`).
    pub fn output(&self) -> Result<u64, EconomyError> {
        self.rate_per_unit
            .checked_mul(u64::from(self.owned))
            .ok_or(EconomyError::Overflow("generator output"))
    }

    //--- Mutation ---------------------------------------------------------

    /// Marks the generator visible. Returns true only on the first call.
    pub(crate) fn unlock(&mut self) -> bool {
        if self.visible {
            return false;
        }
        self.visible = true;
        true
    }

    /// Computes the post-purchase price without touching state.
    pub(crate) fn next_price(&self, growth: f64) -> Result<u64, EconomyError> {
        let owned = self.owned.checked_add(1).ok_or(EconomyError::Overflow("owned count"))?;
        Self::price_for(self.base_price, owned, growth)
    }

    pub(crate) fn apply_purchase(&mut self, new_price: u64) {
        self.owned += 1;
        self.price = new_price;
    }

    pub(crate) fn accumulate_output(&mut self) -> Result<(), EconomyError> {
        let output = self.output()?;
        self.total_generated = self
            .total_generated
            .checked_add(output)
            .ok_or(EconomyError::Overflow("total generated"))?;
        Ok(())
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_recomputes_from_base() {
        assert_eq!(Generator::price_for(100, 0, DEFAULT_PRICE_GROWTH).unwrap(), 100);
        assert_eq!(Generator::price_for(100, 1, DEFAULT_PRICE_GROWTH).unwrap(), 114);
        assert_eq!(Generator::price_for(100, 2, DEFAULT_PRICE_GROWTH).unwrap(), 132);
    }

    #[test]
    fn price_overflow_is_reported() {
        assert_eq!(
            Generator::price_for(u64::MAX / 2, 1_000, DEFAULT_PRICE_GROWTH),
            Err(EconomyError::Overflow("price"))
        );
    }

    #[test]
    fn unlock_reports_first_time_only() {
        let mut generator = Generator::from_spec(0, &default_catalog()[0]);
        assert!(!generator.is_visible());
        assert!(generator.unlock());
        assert!(!generator.unlock());
        assert!(generator.is_visible());
    }

    #[test]
    fn output_scales_with_owned() {
        let mut generator = Generator::from_spec(1, &default_catalog()[1]);
        assert_eq!(generator.output().unwrap(), 0);
        generator.apply_purchase(111);
        generator.apply_purchase(147);
        assert_eq!(generator.output().unwrap(), 22);
        generator.accumulate_output().unwrap();
        assert_eq!(generator.total_generated(), 22);
    }

    #[test]
    fn default_catalog_unlocks_in_ascending_order() {
        let catalog = default_catalog();
        assert_eq!(catalog.len(), 5);
        assert!(catalog
            .windows(2)
            .all(|pair| pair[0].unlock_threshold <= pair[1].unlock_threshold));
    }
}
