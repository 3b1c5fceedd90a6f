//! 打分表：按规则表顺序累计得分，平分时保留先出现的键

/// 有序打分表
#[derive(Debug, Clone)]
pub struct ScoreBoard<K> {
    scores: Vec<(K, u32)>,
}

impl<K> Default for ScoreBoard<K> {
    fn default() -> Self {
        Self { scores: Vec::new() }
    }
}

impl<K: PartialEq> ScoreBoard<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 叠加得分；零分不登记
    pub fn update(&mut self, key: K, points: u32) {
        if points == 0 {
            return;
        }
        match self.scores.iter_mut().find(|(k, _)| *k == key) {
            Some((_, score)) => *score += points,
            None => self.scores.push((key, points)),
        }
    }

    /// 最高分的键（平分取最早登记者）
    pub fn best(self) -> Option<K> {
        let mut best: Option<(K, u32)> = None;
        for (key, score) in self.scores {
            if best.as_ref().is_none_or(|(_, top)| score > *top) {
                best = Some((key, score));
            }
        }
        best.map(|(key, _)| key)
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
