use std::net::{Ipv4Addr, SocketAddr};

use reqwest::StatusCode as HttpStatusCode;
use server::observability;

#[tokio::test]
async fn admin_listener_serves_healthz_and_metrics() -> anyhow::Result<()> {
    // record one request so the counter family is present in the output
    drop(observability::observe("get"));

    let bind: SocketAddr = (Ipv4Addr::LOCALHOST, 0).into();
    let (addr, handle) = common::admin_http::spawn_admin_server(bind, observability::encode_metrics).await?;
    assert_ne!(addr.port(), 0);
    let base_url = format!("http://{}", addr);

    let res = reqwest::get(format!("{}/healthz", base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "OK");

    let res = reqwest::get(format!("{}/metrics", base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.text().await?;
    assert!(body.contains("city_store_requests_total"));
    assert!(body.contains("op=\"get\""));

    handle.abort();
    Ok(())
}

#[tokio::test]
async fn admin_listener_reports_bind_conflict() -> anyhow::Result<()> {
    let taken = tokio::net::TcpListener::bind((Ipv4Addr::LOCALHOST, 0)).await?;
    let addr = taken.local_addr()?;
    let res = common::admin_http::spawn_admin_server(addr, observability::encode_metrics).await;
    assert!(res.is_err());
    Ok(())
}
