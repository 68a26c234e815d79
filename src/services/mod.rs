pub mod guru_directory_service;
pub mod guru_search;
pub mod mock_data;
pub mod presentation;
pub mod report_form_service;
pub mod session_maintenance_service;
pub mod storage_service;
