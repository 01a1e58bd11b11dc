//! # Asset Registry
//!
//! The static catalog of every asset the ledger understands: the base token
//! `PEG` plus the pegged tickers tracking fiat currencies, commodities, and
//! other cryptocurrencies.
//!
//! Membership in this registry is enforced at the type level: an [`AssetId`]
//! can only be constructed for a recognized ticker, so "unknown asset"
//! failures surface at parse boundaries rather than deep inside validation.
//! The declaration order of the variants is the canonical grading order used
//! by downstream consumers for display and ranking; `Ord` on `AssetId` is
//! exactly that order.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// AssetId
// ---------------------------------------------------------------------------

/// A recognized asset identifier.
///
/// Variants are declared in grading order: the base token first, then fiat
/// currencies, commodities, and cryptos. The derived `Ord` follows the
/// declaration order, so sorting a list of `AssetId`s yields the grading
/// order directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AssetId {
    /// The base token of the ledger.
    #[serde(rename = "PEG")]
    Peg,

    // Fiat currencies.
    #[serde(rename = "pUSD")]
    PUsd,
    #[serde(rename = "pEUR")]
    PEur,
    #[serde(rename = "pJPY")]
    PJpy,
    #[serde(rename = "pGBP")]
    PGbp,
    #[serde(rename = "pCAD")]
    PCad,
    #[serde(rename = "pCHF")]
    PChf,
    #[serde(rename = "pINR")]
    PInr,
    #[serde(rename = "pSGD")]
    PSgd,
    #[serde(rename = "pCNY")]
    PCny,
    #[serde(rename = "pHKD")]
    PHkd,
    #[serde(rename = "pKRW")]
    PKrw,
    #[serde(rename = "pBRL")]
    PBrl,
    #[serde(rename = "pPHP")]
    PPhp,
    #[serde(rename = "pMXN")]
    PMxn,

    // Commodities.
    #[serde(rename = "pXAU")]
    PXau,
    #[serde(rename = "pXAG")]
    PXag,
    #[serde(rename = "pXPD")]
    PXpd,
    #[serde(rename = "pXPT")]
    PXpt,

    // Cryptocurrencies.
    #[serde(rename = "pXBT")]
    PXbt,
    #[serde(rename = "pETH")]
    PEth,
    #[serde(rename = "pLTC")]
    PLtc,
    #[serde(rename = "pRVN")]
    PRvn,
    #[serde(rename = "pXBC")]
    PXbc,
    #[serde(rename = "pFCT")]
    PFct,
    #[serde(rename = "pBNB")]
    PBnb,
    #[serde(rename = "pXLM")]
    PXlm,
    #[serde(rename = "pADA")]
    PAda,
    #[serde(rename = "pXMR")]
    PXmr,
    #[serde(rename = "pDASH")]
    PDash,
    #[serde(rename = "pZEC")]
    PZec,
    #[serde(rename = "pDCR")]
    PDcr,
}

/// Broad classification of an asset, mirroring how the pegged tickers are
/// grouped in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetClass {
    /// The ledger's own base token.
    Base,
    /// Pegged fiat currency.
    Currency,
    /// Pegged precious metal.
    Commodity,
    /// Pegged cryptocurrency.
    Crypto,
}

impl AssetId {
    /// Every registered asset, in grading order.
    pub const ALL: [AssetId; 32] = [
        AssetId::Peg,
        AssetId::PUsd,
        AssetId::PEur,
        AssetId::PJpy,
        AssetId::PGbp,
        AssetId::PCad,
        AssetId::PChf,
        AssetId::PInr,
        AssetId::PSgd,
        AssetId::PCny,
        AssetId::PHkd,
        AssetId::PKrw,
        AssetId::PBrl,
        AssetId::PPhp,
        AssetId::PMxn,
        AssetId::PXau,
        AssetId::PXag,
        AssetId::PXpd,
        AssetId::PXpt,
        AssetId::PXbt,
        AssetId::PEth,
        AssetId::PLtc,
        AssetId::PRvn,
        AssetId::PXbc,
        AssetId::PFct,
        AssetId::PBnb,
        AssetId::PXlm,
        AssetId::PAda,
        AssetId::PXmr,
        AssetId::PDash,
        AssetId::PZec,
        AssetId::PDcr,
    ];

    /// The ticker string as it appears on the wire.
    pub fn ticker(&self) -> &'static str {
        match self {
            AssetId::Peg => "PEG",
            AssetId::PUsd => "pUSD",
            AssetId::PEur => "pEUR",
            AssetId::PJpy => "pJPY",
            AssetId::PGbp => "pGBP",
            AssetId::PCad => "pCAD",
            AssetId::PChf => "pCHF",
            AssetId::PInr => "pINR",
            AssetId::PSgd => "pSGD",
            AssetId::PCny => "pCNY",
            AssetId::PHkd => "pHKD",
            AssetId::PKrw => "pKRW",
            AssetId::PBrl => "pBRL",
            AssetId::PPhp => "pPHP",
            AssetId::PMxn => "pMXN",
            AssetId::PXau => "pXAU",
            AssetId::PXag => "pXAG",
            AssetId::PXpd => "pXPD",
            AssetId::PXpt => "pXPT",
            AssetId::PXbt => "pXBT",
            AssetId::PEth => "pETH",
            AssetId::PLtc => "pLTC",
            AssetId::PRvn => "pRVN",
            AssetId::PXbc => "pXBC",
            AssetId::PFct => "pFCT",
            AssetId::PBnb => "pBNB",
            AssetId::PXlm => "pXLM",
            AssetId::PAda => "pADA",
            AssetId::PXmr => "pXMR",
            AssetId::PDash => "pDASH",
            AssetId::PZec => "pZEC",
            AssetId::PDcr => "pDCR",
        }
    }

    /// Which group of the registry this asset belongs to.
    pub fn class(&self) -> AssetClass {
        use AssetId::*;
        match self {
            Peg => AssetClass::Base,
            PUsd | PEur | PJpy | PGbp | PCad | PChf | PInr | PSgd | PCny | PHkd | PKrw | PBrl
            | PPhp | PMxn => AssetClass::Currency,
            PXau | PXag | PXpd | PXpt => AssetClass::Commodity,
            PXbt | PEth | PLtc | PRvn | PXbc | PFct | PBnb | PXlm | PAda | PXmr | PDash | PZec
            | PDcr => AssetClass::Crypto,
        }
    }

    /// `true` for every asset except the base token.
    pub fn is_pegged(&self) -> bool {
        !matches!(self, AssetId::Peg)
    }
}

impl fmt::Display for AssetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ticker())
    }
}

/// Error returned when a ticker string is not in the registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized asset ticker: {0}")]
pub struct UnknownAsset(pub String);

impl FromStr for AssetId {
    type Err = UnknownAsset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AssetId::ALL
            .iter()
            .copied()
            .find(|asset| asset.ticker() == s)
            .ok_or_else(|| UnknownAsset(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
