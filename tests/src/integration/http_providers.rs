//! # HTTP Provider Tests
//!
//! Correios and ViaCEP adapters talking to a scripted server over real
//! localhost sockets, alone and raced through `CepLookupService`.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;

    use cep_lookup::{
        build_http_client, normalize, CepLookupApi, CepLookupConfig, CepLookupService,
        CepProvider, CorreiosProvider, ErrorKind, NormalizedCode, ProviderKind, RawInput,
        ViaCepProvider,
    };

    use axum::http::{header, Method};

    use crate::fixtures::{
        paulista_address, spawn_scripted_server, ScriptedResponse, CORREIOS_PATH,
    };

    // =========================================================================
    // TEST FIXTURES
    // =========================================================================

    const VIACEP_FOUND: &str = r#"{
        "cep": "01310-930",
        "logradouro": "Avenida Paulista",
        "complemento": "2100",
        "bairro": "Bela Vista",
        "localidade": "São Paulo",
        "uf": "SP",
        "ibge": "3550308"
    }"#;

    const VIACEP_MISSING: &str = r#"{ "erro": true }"#;

    const CORREIOS_FOUND: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <ns2:consultaCEPResponse xmlns:ns2="http://cliente.bean.master.sigep.bsb.correios.com.br/">
      <return>
        <bairro>Bela Vista</bairro>
        <cep>01310930</cep>
        <cidade>São Paulo</cidade>
        <end>Avenida Paulista</end>
        <uf>SP</uf>
      </return>
    </ns2:consultaCEPResponse>
  </soap:Body>
</soap:Envelope>"#;

    const CORREIOS_FAULT: &str = r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
  <soap:Body>
    <soap:Fault>
      <faultcode>soap:Server</faultcode>
      <faultstring>CEP NAO ENCONTRADO</faultstring>
    </soap:Fault>
  </soap:Body>
</soap:Envelope>"#;

    fn viacep(base_url: &str) -> ViaCepProvider {
        let client = build_http_client(&CepLookupConfig::for_testing()).unwrap();
        ViaCepProvider::new(client, base_url)
    }

    fn correios(base_url: &str) -> CorreiosProvider {
        let client = build_http_client(&CepLookupConfig::for_testing()).unwrap();
        CorreiosProvider::new(client, format!("{base_url}{CORREIOS_PATH}"))
    }

    fn code(raw: &str) -> NormalizedCode {
        normalize(&RawInput::from(raw)).unwrap()
    }

    // =========================================================================
    // VIACEP
    // =========================================================================

    #[tokio::test]
    async fn test_viacep_found() {
        let server = spawn_scripted_server(ScriptedResponse::json(VIACEP_FOUND))
            .await
            .unwrap();

        let address = viacep(&server.base_url)
            .fetch(&code("01310-930"))
            .await
            .unwrap();

        assert_eq!(address, paulista_address("viacep"));
        let requests = server.requests.lock();
        assert_eq!(requests[0].method, Method::GET);
        assert_eq!(requests[0].uri.path(), "/ws/01310930/json/");
    }

    #[tokio::test]
    async fn test_viacep_erro_flag_is_failure() {
        let server = spawn_scripted_server(ScriptedResponse::json(VIACEP_MISSING))
            .await
            .unwrap();

        let failure = viacep(&server.base_url)
            .fetch(&code("99999999"))
            .await
            .unwrap_err();

        assert_eq!(failure.service, "viacep");
        assert_eq!(failure.message, "CEP not found in the ViaCEP database");
    }

    #[tokio::test]
    async fn test_viacep_garbage_body_is_failure() {
        let server = spawn_scripted_server(ScriptedResponse::json("<html>oops</html>"))
            .await
            .unwrap();

        let failure = viacep(&server.base_url)
            .fetch(&code("01310930"))
            .await
            .unwrap_err();

        assert_eq!(failure.service, "viacep");
        assert!(failure
            .message
            .starts_with("could not interpret the ViaCEP response"));
    }

    #[tokio::test]
    async fn test_viacep_unknown_route_is_failure() {
        let server = spawn_scripted_server(ScriptedResponse::json(VIACEP_FOUND))
            .await
            .unwrap();

        let failure = viacep(&format!("{}/v2", server.base_url))
            .fetch(&code("01310930"))
            .await
            .unwrap_err();

        assert_eq!(failure.service, "viacep");
        assert!(failure.message.contains("404"), "{}", failure.message);
        assert_eq!(server.hits.load(Ordering::SeqCst), 0);
    }

    // =========================================================================
    // CORREIOS
    // =========================================================================

    #[tokio::test]
    async fn test_correios_found() {
        let server = spawn_scripted_server(ScriptedResponse::xml(200, CORREIOS_FOUND))
            .await
            .unwrap();

        let address = correios(&server.base_url)
            .fetch(&code("01310930"))
            .await
            .unwrap();

        assert_eq!(address, paulista_address("correios"));
        let requests = server.requests.lock();
        assert_eq!(requests[0].method, Method::POST);
        assert_eq!(requests[0].uri.path(), CORREIOS_PATH);
        assert!(requests[0].body.contains("<cep>01310930</cep>"));
        assert_eq!(
            requests[0].header(header::CONTENT_TYPE),
            Some("text/xml;charset=UTF-8")
        );
        assert_eq!(requests[0].header(header::CACHE_CONTROL), Some("no-cache"));
    }

    #[tokio::test]
    async fn test_correios_fault_message_surfaces() {
        let server = spawn_scripted_server(ScriptedResponse::xml(500, CORREIOS_FAULT))
            .await
            .unwrap();

        let failure = correios(&server.base_url)
            .fetch(&code("99999999"))
            .await
            .unwrap_err();

        assert_eq!(failure.service, "correios");
        assert_eq!(failure.message, "CEP NAO ENCONTRADO");
    }

    #[tokio::test]
    async fn test_correios_unreadable_error_body() {
        let server = spawn_scripted_server(ScriptedResponse::xml(503, "maintenance"))
            .await
            .unwrap();

        let failure = correios(&server.base_url)
            .fetch(&code("01310930"))
            .await
            .unwrap_err();

        assert_eq!(failure.service, "correios");
        assert_eq!(failure.message, "could not interpret the Correios response");
    }

    #[tokio::test]
    async fn test_correios_unreachable() {
        let failure = correios("http://127.0.0.1:9")
            .fetch(&code("01310930"))
            .await
            .unwrap_err();

        assert_eq!(failure.service, "correios");
        assert!(failure
            .message
            .starts_with("could not contact the Correios service"));
    }

    // =========================================================================
    // RACE OVER HTTP
    // =========================================================================

    #[tokio::test]
    async fn test_fast_viacep_beats_slow_correios_fault() {
        let slow_correios =
            spawn_scripted_server(ScriptedResponse::xml(500, CORREIOS_FAULT).delayed_ms(300))
                .await
                .unwrap();
        let fast_viacep = spawn_scripted_server(ScriptedResponse::json(VIACEP_FOUND))
            .await
            .unwrap();

        let service = CepLookupService::new(vec![
            Arc::new(correios(&slow_correios.base_url)) as Arc<dyn CepProvider>,
            Arc::new(viacep(&fast_viacep.base_url)),
        ]);

        let address = service.lookup("01310-930".into()).await.unwrap();
        assert_eq!(address.service, "viacep");
        assert_eq!(fast_viacep.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_both_providers_failing_over_http() {
        let correios_server = spawn_scripted_server(ScriptedResponse::xml(500, CORREIOS_FAULT))
            .await
            .unwrap();
        let viacep_server = spawn_scripted_server(ScriptedResponse::json(VIACEP_MISSING))
            .await
            .unwrap();

        let service = CepLookupService::new(vec![
            Arc::new(correios(&correios_server.base_url)) as Arc<dyn CepProvider>,
            Arc::new(viacep(&viacep_server.base_url)),
        ]);

        let err = service.lookup(RawInput::from(99999999u32)).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ServiceError);
        assert_eq!(err.errors.len(), 2);

        let correios_record = err.errors.iter().find(|r| r.service == "correios").unwrap();
        assert_eq!(correios_record.message, "CEP NAO ENCONTRADO");
        let viacep_record = err.errors.iter().find(|r| r.service == "viacep").unwrap();
        assert_eq!(viacep_record.message, "CEP not found in the ViaCEP database");
    }

    #[tokio::test]
    async fn test_validation_failure_opens_no_connection() {
        let server = spawn_scripted_server(ScriptedResponse::json(VIACEP_FOUND))
            .await
            .unwrap();
        let service = CepLookupService::new(vec![
            Arc::new(viacep(&server.base_url)) as Arc<dyn CepProvider>
        ]);

        let err = service.lookup("123456789".into()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert_eq!(server.hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_service_from_config_uses_configured_endpoints() {
        let server = spawn_scripted_server(ScriptedResponse::json(VIACEP_FOUND))
            .await
            .unwrap();
        let config = CepLookupConfig {
            providers: vec![ProviderKind::ViaCep],
            viacep_base_url: server.base_url.clone(),
            ..CepLookupConfig::for_testing()
        };

        let service = CepLookupService::from_config(&config).unwrap();
        let address = service.lookup("01310930".into()).await.unwrap();

        assert_eq!(address.service, "viacep");
        let requests = server.requests.lock();
        assert_eq!(requests[0].uri.path(), "/ws/01310930/json/");
        assert_eq!(requests[0].header(header::USER_AGENT), Some("cep-lookup-test"));
    }
}
