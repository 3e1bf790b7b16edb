//! Application State
//!
//! Wires the configured store and one shared number generator into the
//! service set. Cloning is cheap; every clone talks to the same store
//! and sequence.

use crate::billing::BillingService;
use crate::config::Config;
use crate::enquiry::EnquiryService;
use crate::numbering::NumberGenerator;
use crate::registry::RegistryService;
use crate::reports::ReportService;
use crate::returns::ReturnService;
use crate::settlement::SettlementService;
use crate::store::{Store, StoreHandle};
use std::sync::Arc;

pub struct Ledger {
    pub billing: BillingService,
    pub settlement: SettlementService,
    pub returns: ReturnService,
    pub reports: ReportService,
    pub registry: RegistryService,
    pub enquiry: EnquiryService,
}

impl Ledger {
    pub fn new(config: &Config, store: Arc<dyn Store>) -> Self {
        let handle = StoreHandle::new(store, config.store_timeout_ms);
        let numbers = Arc::new(NumberGenerator::new());
        Self {
            billing: BillingService::new(handle.clone(), numbers.clone()),
            settlement: SettlementService::new(handle.clone(), config.verification_code.clone()),
            returns: ReturnService::new(handle.clone(), numbers.clone()),
            reports: ReportService::new(handle.clone()),
            registry: RegistryService::new(handle.clone(), numbers),
            enquiry: EnquiryService::new(handle),
        }
    }
}
