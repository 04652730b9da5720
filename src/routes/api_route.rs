use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::services::{fetch_all_sections, ForensicScraper, RegulatorScraper};

use super::dashboard_route::ForensicQuery;

#[derive(Serialize)]
struct ForensicResponse {
    company: String,
    findings: Vec<String>,
}

#[get("/forensic")]
async fn forensic(
    forensic_scraper: web::Data<ForensicScraper>,
    query: web::Query<ForensicQuery>,
) -> HttpResponse {
    let company = query.into_inner().company.trim().to_string();
    let findings = forensic_scraper.lookup(&company).await;

    HttpResponse::Ok().json(ForensicResponse { company, findings })
}

#[get("/headlines")]
async fn headlines(regulator_scrapers: web::Data<Vec<RegulatorScraper>>) -> HttpResponse {
    HttpResponse::Ok().json(fetch_all_sections(&regulator_scrapers).await)
}
