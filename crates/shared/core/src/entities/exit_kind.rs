use serde::{Deserialize, Serialize};

/// Terminal or liquidity event types
///
/// These represent ownership monetization rather than fresh capital and are
/// never counted in specialization accounting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitKind {
    Buyout,
    Acquisition,
    Ipo,
    PostIpoEquity,
    PostIpoConvertible,
    PostIpoDebt,
    PostIpoSecondary,
    SpacIpo,
    SpacPrivatePlacement,
}

impl ExitKind {
    pub const ALL: [ExitKind; 9] = [
        ExitKind::Buyout,
        ExitKind::Acquisition,
        ExitKind::Ipo,
        ExitKind::PostIpoEquity,
        ExitKind::PostIpoConvertible,
        ExitKind::PostIpoDebt,
        ExitKind::PostIpoSecondary,
        ExitKind::SpacIpo,
        ExitKind::SpacPrivatePlacement,
    ];

    /// Canonical ledger label
    pub fn label(&self) -> &'static str {
        match self {
            ExitKind::Buyout => "BUYOUT",
            ExitKind::Acquisition => "ACQUISITION",
            ExitKind::Ipo => "IPO",
            ExitKind::PostIpoEquity => "POST IPO EQUITY",
            ExitKind::PostIpoConvertible => "POST IPO CONVERTIBLE",
            ExitKind::PostIpoDebt => "POST IPO DEBT",
            ExitKind::PostIpoSecondary => "POST IPO SECONDARY",
            ExitKind::SpacIpo => "SPAC IPO",
            ExitKind::SpacPrivatePlacement => "SPAC PRIVATE PLACEMENT",
        }
    }

    /// Exact label match, trimmed and case-insensitive
    ///
    /// Unrecognized labels are never exits.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label))
    }
}

impl std::fmt::Display for ExitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
