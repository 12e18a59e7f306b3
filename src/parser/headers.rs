//! Header Resolution
//!
//! サマリーシートの列見出しから、論理列（住戸・家賃・入金・残高）の位置を解決します。
//!
//! 役割ごとに「受け付ける見出し断片」の順位付きリストを持ち、
//! 上位の候補から順に、左端から最初に部分一致した列を採用します（先勝ち）。
//! どの候補にも一致しない役割は未解決として扱い、シート全体を読み飛ばします。

use crate::api::ColumnRole;
use crate::error::SkipReason;

/// 役割ごとの見出し候補（小文字、前後空白除去済み）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCandidates {
    unit: Vec<String>,
    rent: Vec<String>,
    paid: Vec<String>,
    balance: Vec<String>,
}

impl Default for HeaderCandidates {
    fn default() -> Self {
        Self {
            unit: vec!["house".into(), "hse".into(), "unit".into()],
            rent: vec!["rent".into()],
            paid: vec!["paid".into()],
            balance: vec!["balance".into()],
        }
    }
}

impl HeaderCandidates {
    /// 指定した役割の候補（順位順）
    pub fn candidates(&self, role: ColumnRole) -> &[String] {
        match role {
            ColumnRole::Unit => &self.unit,
            ColumnRole::Rent => &self.rent,
            ColumnRole::Paid => &self.paid,
            ColumnRole::Balance => &self.balance,
        }
    }

    /// 指定した役割の候補を置き換える
    ///
    /// 候補は小文字化・前後空白除去した上で保持されます。
    pub fn set<I, S>(&mut self, role: ColumnRole, candidates: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let normalized = candidates
            .into_iter()
            .map(|c| c.as_ref().trim().to_lowercase())
            .collect();
        match role {
            ColumnRole::Unit => self.unit = normalized,
            ColumnRole::Rent => self.rent = normalized,
            ColumnRole::Paid => self.paid = normalized,
            ColumnRole::Balance => self.balance = normalized,
        }
    }
}

/// 解決済みの列位置（1始まり）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct ResolvedColumns {
    pub unit: u32,
    pub rent: u32,
    pub paid: u32,
    pub balance: u32,
}

/// 順位付き候補による列見出しリゾルバー
#[derive(Debug)]
pub(crate) struct HeaderResolver<'a> {
    candidates: &'a HeaderCandidates,
}

impl<'a> HeaderResolver<'a> {
    pub fn new(candidates: &'a HeaderCandidates) -> Self {
        Self { candidates }
    }

    /// 1つの役割を解決する
    ///
    /// `headers`は1列目からの見出し（小文字化済み）。戻り値は1始まりの列番号。
    pub fn resolve_role(&self, role: ColumnRole, headers: &[String]) -> Option<u32> {
        self.candidates
            .candidates(role)
            .iter()
            .find_map(|candidate| headers.iter().position(|h| h.contains(candidate.as_str())))
            .map(|index| index as u32 + 1)
    }

    /// すべての役割を解決する
    ///
    /// 1つでも未解決の役割があれば`SkipReason::MissingHeader`。
    pub fn resolve(&self, headers: &[String]) -> Result<ResolvedColumns, SkipReason> {
        let find = |role| {
            self.resolve_role(role, headers)
                .ok_or(SkipReason::MissingHeader { role })
        };

        Ok(ResolvedColumns {
            unit: find(ColumnRole::Unit)?,
            rent: find(ColumnRole::Rent)?,
            paid: find(ColumnRole::Paid)?,
            balance: find(ColumnRole::Balance)?,
        })
    }
}
