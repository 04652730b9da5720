use std::net::TcpListener;

use actix_files::Files;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};

use crate::{
    routes::{api_route, dashboard_route, default_route},
    services::{ForensicScraper, RegulatorScraper},
};

pub fn run(
    listener: TcpListener,
    forensic_scraper: ForensicScraper,
    regulator_scrapers: Vec<RegulatorScraper>,
) -> Result<Server, std::io::Error> {
    let forensic_scraper = web::Data::new(forensic_scraper);
    let regulator_scrapers = web::Data::new(regulator_scrapers);

    let server = HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .service(Files::new("/static", "./templates/static").prefer_utf8(true))
            .service(default_route::health_check)
            .service(dashboard_route::dashboard)
            .service(dashboard_route::forensic_check)
            .service(dashboard_route::refresh_headlines)
            .service(
                web::scope("/api")
                    .service(api_route::forensic)
                    .service(api_route::headlines),
            )
            .app_data(forensic_scraper.clone())
            .app_data(regulator_scrapers.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
