use std::cmp::Ordering;

use indexmap::IndexMap;

///  TokenFrequency 構造体
/// tokenの出現回数を管理するための構造体です
/// コーパス全体の頻度順位づけに使います
///
/// # Examples
/// ```
/// use text_anomaly_scorer::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_tokens(&["token1", "token2", "token1"]);
///
/// let ranked = token_freq.ranked_tokens();
/// assert_eq!(ranked[0], ("token1", 2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    token_count: IndexMap<String, u64>,
    total_token_count: u64,
}

/// Tokenの追加
impl TokenFrequency {
    /// 新しいTokenFrequencyを作成するメソッド
    pub fn new() -> Self {
        TokenFrequency {
            token_count: IndexMap::new(),
            total_token_count: 0,
        }
    }

    /// Count every token of one document
    pub fn from_tokens<T>(tokens: &[T]) -> Self
    where
        T: AsRef<str>,
    {
        let mut freq = Self::new();
        freq.add_tokens(tokens);
        freq
    }

    /// tokenを追加する
    ///
    /// # Arguments
    /// * `token` - 追加するトークン
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        if let Some(count) = self.token_count.get_mut(token) {
            *count += 1;
        } else {
            self.token_count.insert(token.to_string(), 1);
        }
        self.total_token_count += 1;
        self
    }

    /// 複数のtokenを追加する
    ///
    /// # Arguments
    /// * `tokens` - 追加するトークンのスライス
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Add all counts of `other` into self
    pub fn merge(&mut self, other: TokenFrequency) -> &mut Self {
        for (token, count) in other.token_count {
            *self.token_count.entry(token).or_insert(0) += count;
        }
        self.total_token_count += other.total_token_count;
        self
    }
}

/// TokenFrequencyの情報を取得するための実装
impl TokenFrequency {
    /// あるtokenの出現回数を取得します
    #[inline]
    pub fn token_count(&self, token: &str) -> u64 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// 全tokenのカウントの合計
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// 出現した単語数 (distinct)
    #[inline]
    pub fn token_num(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// (token, count) in first-seen order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.token_count.iter().map(|(token, &count)| (token.as_str(), count))
    }

    /// 頻度順に並べたトークン
    /// count descending, ties by token ascending, so the order does not
    /// depend on insertion order
    ///
    /// # Returns
    /// * `Vec<(&str, u64)>` - rank順のトークンと出現回数
    pub fn ranked_tokens(&self) -> Vec<(&str, u64)> {
        let mut token_list: Vec<(&str, u64)> = self
            .token_count
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
            .collect();

        token_list.sort_unstable_by(|a, b| Self::rank_order(a, b));
        token_list
    }

    #[inline]
    fn rank_order(a: &(&str, u64), b: &(&str, u64)) -> Ordering {
        b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_tokens() {
        let freq = TokenFrequency::from_tokens(&["a", "b", "a", "c", "a"]);
        assert_eq!(freq.token_count("a"), 3);
        assert_eq!(freq.token_count("b"), 1);
        assert_eq!(freq.token_count("z"), 0);
        assert_eq!(freq.token_sum(), 5);
        assert_eq!(freq.token_num(), 3);
        assert!(freq.contains_token("c"));
    }

    #[test]
    fn ranked_tokens_breaks_ties_by_token() {
        let freq = TokenFrequency::from_tokens(&["z", "y", "x", "y", "m", "m"]);
        assert_eq!(
            freq.ranked_tokens(),
            vec![("m", 2), ("y", 2), ("x", 1), ("z", 1)]
        );
    }

    #[test]
    fn ranking_ignores_insertion_order() {
        let a = TokenFrequency::from_tokens(&["q", "p", "r", "p"]);
        let b = TokenFrequency::from_tokens(&["r", "p", "p", "q"]);
        assert_eq!(a.ranked_tokens(), b.ranked_tokens());
    }

    #[test]
    fn merge_adds_counts() {
        let mut a = TokenFrequency::from_tokens(&["a", "b"]);
        let b = TokenFrequency::from_tokens(&["b", "c", "c"]);
        a.merge(b);
        assert_eq!(a.token_count("a"), 1);
        assert_eq!(a.token_count("b"), 2);
        assert_eq!(a.token_count("c"), 2);
        assert_eq!(a.token_sum(), 5);
        assert_eq!(a.token_num(), 3);
    }

    #[test]
    fn accepts_owned_strings() {
        let doc = vec!["x".to_string(), "x".to_string()];
        let freq = TokenFrequency::from_tokens(&doc);
        assert_eq!(freq.token_count("x"), 2);
    }
}
