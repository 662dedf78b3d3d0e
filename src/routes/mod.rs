pub mod assist_routes;
