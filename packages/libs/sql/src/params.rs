//! 목록 조회 파라미터
//!
//! `GET /news` 쿼리스트링을 파싱하고 검증합니다.

use serde::{Deserialize, Serialize};

use nd_core::model::{ArticleStatus, ColumnTag};
use nd_core::policy::FilterExpr;

/// 원본 쿼리스트링 파라미터
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListParams {
    /// 제한
    #[serde(default)]
    pub limit: Option<u64>,

    /// 오프셋
    #[serde(default)]
    pub offset: Option<u64>,

    /// 상태 코드 (`DRAF`, `PUBD`)
    #[serde(default)]
    pub status: Option<String>,

    /// 칼럼 코드 (빈 문자열 = 칼럼 미지정 기사만)
    #[serde(default)]
    pub column: Option<String>,

    /// 정렬 (`-` 접두사 = 내림차순)
    #[serde(default)]
    pub ordering: Option<String>,
}

/// 정렬 기준
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Ordering {
    CreatedAtAsc,
    #[default]
    CreatedAtDesc,
    UpdatedAtAsc,
    UpdatedAtDesc,
    TitleAsc,
    TitleDesc,
}

impl Ordering {
    /// 문자열 파싱
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created_at" => Some(Ordering::CreatedAtAsc),
            "-created_at" => Some(Ordering::CreatedAtDesc),
            "updated_at" => Some(Ordering::UpdatedAtAsc),
            "-updated_at" => Some(Ordering::UpdatedAtDesc),
            "title" => Some(Ordering::TitleAsc),
            "-title" => Some(Ordering::TitleDesc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ordering::CreatedAtAsc => "created_at",
            Ordering::CreatedAtDesc => "-created_at",
            Ordering::UpdatedAtAsc => "updated_at",
            Ordering::UpdatedAtDesc => "-updated_at",
            Ordering::TitleAsc => "title",
            Ordering::TitleDesc => "-title",
        }
    }
}

/// 검증된 목록 조회 조건
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: u64,
    pub offset: u64,
    pub ordering: Ordering,

    /// 가시성 필터에 AND로 추가할 사용자 조건
    pub conditions: Vec<FilterExpr>,
}

/// 파라미터 검증 에러
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamsError {
    #[error("limit must be at least 1")]
    ZeroLimit,

    #[error("unknown status: {0}")]
    UnknownStatus(String),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown ordering: {0}")]
    UnknownOrdering(String),
}

impl ListParams {
    /// 검증 및 기본값 적용
    ///
    /// `limit`은 `max_limit`을 넘으면 잘라냅니다.
    pub fn resolve(&self, default_limit: u64, max_limit: u64) -> Result<ListQuery, ParamsError> {
        let limit = match self.limit {
            Some(0) => return Err(ParamsError::ZeroLimit),
            Some(limit) => limit.min(max_limit),
            None => default_limit.min(max_limit),
        };

        let mut conditions = Vec::new();

        if let Some(status) = self.status.as_deref().filter(|s| !s.is_empty()) {
            let status = ArticleStatus::from_code(status)
                .map_err(|_| ParamsError::UnknownStatus(status.to_string()))?;
            conditions.push(FilterExpr::StatusIs(status));
        }

        if let Some(column) = self.column.as_deref() {
            match ColumnTag::from_optional_code(Some(column)) {
                Ok(Some(tag)) => conditions.push(FilterExpr::ColumnIn([tag].into_iter().collect())),
                Ok(None) => conditions.push(FilterExpr::ColumnUnset),
                Err(_) => return Err(ParamsError::UnknownColumn(column.to_string())),
            }
        }

        let ordering = match self.ordering.as_deref().filter(|s| !s.is_empty()) {
            Some(raw) => {
                Ordering::parse(raw).ok_or_else(|| ParamsError::UnknownOrdering(raw.to_string()))?
            }
            None => Ordering::default(),
        };

        Ok(ListQuery {
            limit,
            offset: self.offset.unwrap_or(0),
            ordering,
            conditions,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let query = ListParams::default().resolve(50, 200).unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 0);
        assert_eq!(query.ordering, Ordering::CreatedAtDesc);
        assert!(query.conditions.is_empty());
    }

    #[test]
    fn test_limit_clamped() {
        let params = ListParams {
            limit: Some(1000),
            ..Default::default()
        };
        assert_eq!(params.resolve(50, 200).unwrap().limit, 200);

        let params = ListParams {
            limit: Some(0),
            ..Default::default()
        };
        assert_eq!(params.resolve(50, 200), Err(ParamsError::ZeroLimit));
    }

    #[test]
    fn test_filters_parsed() {
        let params: ListParams = serde_json::from_value(serde_json::json!({
            "status": "PUBD",
            "column": "TAX",
            "ordering": "title"
        }))
        .unwrap();

        let query = params.resolve(50, 200).unwrap();
        assert_eq!(query.ordering, Ordering::TitleAsc);
        assert_eq!(
            query.conditions,
            vec![
                FilterExpr::StatusIs(ArticleStatus::Published),
                FilterExpr::ColumnIn([ColumnTag::Taxes].into_iter().collect()),
            ]
        );
    }

    #[test]
    fn test_blank_column_means_unset() {
        let params = ListParams {
            column: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(
            params.resolve(50, 200).unwrap().conditions,
            vec![FilterExpr::ColumnUnset]
        );
    }

    #[test]
    fn test_unknown_values_rejected() {
        let params = ListParams {
            status: Some("LIVE".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.resolve(50, 200), Err(ParamsError::UnknownStatus(_))));

        let params = ListParams {
            ordering: Some("author".to_string()),
            ..Default::default()
        };
        assert!(matches!(params.resolve(50, 200), Err(ParamsError::UnknownOrdering(_))));
    }
}
