use offerbot_types::{ItemSpec, SteamId};
use std::collections::HashSet;

/// An offer under construction, before it is handed to the network.
///
/// Attachment is per side and refuses zero-amount entries and repeated
/// asset ids, so the attached count can run short of the requested
/// count. Callers compare the two before sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeOfferDraft {
    partner: SteamId,
    items_to_give: Vec<ItemSpec>,
    items_to_receive: Vec<ItemSpec>,
}

impl TradeOfferDraft {
    pub fn new(partner: SteamId) -> Self {
        Self {
            partner,
            items_to_give: Vec::new(),
            items_to_receive: Vec::new(),
        }
    }

    pub fn partner(&self) -> &SteamId {
        &self.partner
    }

    pub fn items_to_give(&self) -> &[ItemSpec] {
        &self.items_to_give
    }

    pub fn items_to_receive(&self) -> &[ItemSpec] {
        &self.items_to_receive
    }

    /// Attach items from our side. Returns how many were actually
    /// attached.
    pub fn add_items_to_give(&mut self, items: &[ItemSpec]) -> usize {
        Self::attach(&mut self.items_to_give, items)
    }

    /// Attach items from the counterparty's side. Returns how many were
    /// actually attached.
    pub fn add_items_to_receive(&mut self, items: &[ItemSpec]) -> usize {
        Self::attach(&mut self.items_to_receive, items)
    }

    fn attach(target: &mut Vec<ItemSpec>, items: &[ItemSpec]) -> usize {
        let mut seen: HashSet<String> = target.iter().map(|i| i.assetid.clone()).collect();
        let mut attached = 0;
        for item in items {
            if item.amount == 0 {
                continue;
            }
            if !seen.insert(item.assetid.clone()) {
                continue;
            }
            target.push(item.clone());
            attached += 1;
        }
        attached
    }
}
