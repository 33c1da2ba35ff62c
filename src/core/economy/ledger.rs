//=========================================================================
// Resource Ledger
//=========================================================================
//
// The debt counter, its generation rate and the lagging displayed value.
//
//=========================================================================

use super::EconomyError;

/// Balance, rate and displayed balance of the single accruing resource.
///
/// `displayed_balance` trails `balance` while a catch-up tween is running
/// and never exceeds it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceLedger {
    balance: u64,
    generation_rate: u64,
    pub(crate) displayed_balance: u64,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self) -> u64 {
        self.balance
    }

    /// Resource added per tick.
    pub fn generation_rate(&self) -> u64 {
        self.generation_rate
    }

    pub fn displayed_balance(&self) -> u64 {
        self.displayed_balance
    }

    //--- Mutation (economy only) ------------------------------------------

    /// Adds `amount`, returning the balance before the add.
    pub(crate) fn credit(&mut self, amount: u64) -> Result<u64, EconomyError> {
        let before = self.balance;
        self.balance = before
            .checked_add(amount)
            .ok_or(EconomyError::Overflow("balance"))?;
        Ok(before)
    }

    /// Pays `price` if affordable and snaps the displayed balance.
    pub(crate) fn try_debit(&mut self, price: u64) -> bool {
        match self.balance.checked_sub(price) {
            Some(rest) => {
                self.balance = rest;
                self.displayed_balance = rest;
                true
            }
            None => false,
        }
    }

    pub(crate) fn raise_rate(&mut self, by: u64) -> Result<(), EconomyError> {
        self.generation_rate = self
            .generation_rate
            .checked_add(by)
            .ok_or(EconomyError::Overflow("generation rate"))?;
        Ok(())
    }

    pub(crate) fn snap_display(&mut self) {
        self.displayed_balance = self.balance;
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credit_reports_previous_balance() {
        let mut ledger = ResourceLedger::new();
        assert_eq!(ledger.credit(5), Ok(0));
        assert_eq!(ledger.credit(7), Ok(5));
        assert_eq!(ledger.balance(), 12);
        assert_eq!(ledger.displayed_balance(), 0);
    }

    #[test]
    fn credit_refuses_to_wrap() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(u64::MAX).unwrap();
        assert_eq!(ledger.credit(1), Err(EconomyError::Overflow("balance")));
        assert_eq!(ledger.balance(), u64::MAX);
    }

    #[test]
    fn debit_never_goes_negative() {
        let mut ledger = ResourceLedger::new();
        ledger.credit(9).unwrap();
        assert!(!ledger.try_debit(10));
        assert_eq!(ledger.balance(), 9);
        assert!(ledger.try_debit(9));
        assert_eq!(ledger.balance(), 0);
        assert_eq!(ledger.displayed_balance(), 0);
    }
}
