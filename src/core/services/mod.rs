pub mod allocation_service;
pub mod cost_service;
pub mod profit_service;
pub mod revenue_service;
pub mod summary_service;

pub use allocation_service::{AllocationPlan, AllocationService, AllocationShare};
pub use cost_service::CostService;
pub use profit_service::ProfitService;
pub use revenue_service::RevenueService;
pub use summary_service::{
    CategoryReport, CostLine, Dashboard, Report, SubcategoryReport, SummaryService,
};
