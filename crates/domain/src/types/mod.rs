//! Domain types and models

pub mod analysis;
pub mod forecast;

pub use analysis::{
    Analysis, AnalysisRecord, AnalysisSession, AnalysisStatus, Flag, FlagType, MonthVariance,
    PoAnalysis, Question, QuestionOption, Scenario, ScenarioForecast, Severity,
    SuggestedReasonCode, ThresholdAlert, ThresholdAlertType,
};
pub use forecast::{
    ForecastMonth, ForecastReviewRequest, ForecastReviewResponse, ProjectInfo, PurchaseOrder,
    ReasonCode,
};
