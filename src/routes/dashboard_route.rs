use actix_web::{get, web, HttpResponse};
use askama::Template;
use serde::Deserialize;

use crate::{
    domain::headline::HeadlineSection,
    services::{fetch_all_sections, ForensicScraper, RegulatorScraper},
};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardTemplate {
    company: String,
    findings: Vec<String>,
    headlines_requested: bool,
    sections: Vec<HeadlineSection>,
}

impl DashboardTemplate {
    fn empty(company: String) -> Self {
        DashboardTemplate {
            company,
            findings: vec![],
            headlines_requested: false,
            sections: vec![],
        }
    }
}

fn render(template: DashboardTemplate) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            log::error!("Failed to render dashboard: {:?}", e);
            HttpResponse::InternalServerError().body("Failed to render dashboard")
        }
    }
}

#[derive(Deserialize)]
pub struct ForensicQuery {
    #[serde(default)]
    pub company: String,
}

#[get("/")]
async fn dashboard(forensic_scraper: web::Data<ForensicScraper>) -> HttpResponse {
    render(DashboardTemplate::empty(
        forensic_scraper.default_company().to_string(),
    ))
}

#[get("/forensic")]
async fn forensic_check(
    forensic_scraper: web::Data<ForensicScraper>,
    query: web::Query<ForensicQuery>,
) -> HttpResponse {
    let findings = forensic_scraper.lookup(&query.company).await;

    render(DashboardTemplate {
        findings,
        ..DashboardTemplate::empty(query.company.trim().to_string())
    })
}

/// Keeps the company typed into the forensic column across the refresh.
#[get("/headlines")]
async fn refresh_headlines(
    forensic_scraper: web::Data<ForensicScraper>,
    regulator_scrapers: web::Data<Vec<RegulatorScraper>>,
    query: web::Query<ForensicQuery>,
) -> HttpResponse {
    let sections = fetch_all_sections(&regulator_scrapers).await;
    let company = match query.company.trim() {
        "" => forensic_scraper.default_company().to_string(),
        typed => typed.to_string(),
    };

    render(DashboardTemplate {
        headlines_requested: true,
        sections,
        ..DashboardTemplate::empty(company)
    })
}
