use super::UnitRecord;
use fnv::FnvHashMap;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Tier {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TieredCorpus {
    pub easy: Vec<UnitRecord>,
    pub medium: Vec<UnitRecord>,
    pub hard: Vec<UnitRecord>,
}

impl TieredCorpus {
    pub fn tier(&self, tier: Tier) -> &[UnitRecord] {
        match tier {
            Tier::Easy => &self.easy,
            Tier::Medium => &self.medium,
            Tier::Hard => &self.hard,
        }
    }

    pub fn len(&self) -> usize {
        self.easy.len() + self.medium.len() + self.hard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Standard scores using the sample standard deviation. All zeros when
/// the values do not vary.
pub fn z_score(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let stdev = if n > 1 {
        let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
        var.sqrt()
    } else {
        0.0
    };
    if stdev == 0.0 {
        return vec![0.0; n];
    }
    values.iter().map(|v| (v - mean) / stdev).collect()
}

/// Splits records into easy/medium/hard thirds per author.
///
/// Difficulty is `0.6·z(fk) + 0.3·z(poly) − 0.1·z(burden)`; factual burden
/// counts against difficulty because these are fluency drills. Authors with
/// one unit land in hard, two units split medium/hard. Under three records
/// overall, everything is hard.
pub fn assign_tiers(records: Vec<UnitRecord>) -> TieredCorpus {
    if records.len() < 3 {
        return TieredCorpus {
            hard: records,
            ..TieredCorpus::default()
        };
    }

    let column = |f: fn(&UnitRecord) -> f64| z_score(&records.iter().map(f).collect::<Vec<_>>());
    let fk = column(|r| r.fk_grade);
    let poly = column(|r| r.pct_poly);
    let burden = column(|r| r.factual_burden);

    // authors in order of first appearance
    let mut order: Vec<String> = Vec::new();
    let mut by_author: FnvHashMap<String, Vec<(f64, UnitRecord)>> = FnvHashMap::default();
    for (i, record) in records.into_iter().enumerate() {
        let difficulty = 0.6 * fk[i] + 0.3 * poly[i] - 0.1 * burden[i];
        if !by_author.contains_key(&record.author) {
            order.push(record.author.clone());
        }
        by_author
            .entry(record.author.clone())
            .or_default()
            .push((difficulty, record));
    }

    let mut tiers = TieredCorpus::default();
    for author in order {
        let Some(mut rows) = by_author.remove(&author) else {
            continue;
        };
        rows.sort_by(|a, b| a.0.total_cmp(&b.0));
        let mut rows: Vec<UnitRecord> = rows.into_iter().map(|(_, r)| r).collect();

        let n = rows.len();
        match n {
            1 => tiers.hard.append(&mut rows),
            2 => {
                tiers.hard.push(rows.remove(1));
                tiers.medium.append(&mut rows);
            }
            _ => {
                let cut1 = (n / 3).max(1);
                let cut2 = ((2 * n) / 3).max(cut1 + 1).min(n - 1);
                let hard = rows.split_off(cut2);
                let medium = rows.split_off(cut1);
                tiers.easy.extend(rows);
                tiers.medium.extend(medium);
                tiers.hard.extend(hard);
            }
        }
    }
    tiers
}
