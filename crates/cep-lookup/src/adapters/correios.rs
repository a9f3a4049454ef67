//! Correios Provider Adapter
//!
//! Implements `CepProvider` against the Correios SIGEP `AtendeCliente` SOAP
//! service (`consultaCEP` operation).

use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::reader::Reader;
use reqwest::Client;
use std::collections::HashMap;
use tracing::debug;

use super::http::AdapterError;
use crate::config::ProviderKind;
use crate::domain::{AddressResult, NormalizedCode, ProviderFailure};
use crate::ports::outbound::CepProvider;

const SERVICE: &str = "correios";

/// Correios-backed provider.
pub struct CorreiosProvider {
    client: Client,
    url: String,
}

impl CorreiosProvider {
    /// Create a provider using `client` against the SOAP endpoint `url`.
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    async fn request(&self, code: &NormalizedCode) -> Result<AddressResult, AdapterError> {
        debug!(url = %self.url, "querying Correios");

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, "text/xml;charset=UTF-8")
            .header(reqwest::header::CACHE_CONTROL, "no-cache")
            .body(build_soap_envelope(code))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            parse_consulta_response(&body)
        } else {
            Err(parse_fault(&body)?.map_or(AdapterError::Status(status), AdapterError::Fault))
        }
    }
}

/// SOAP 1.1 `consultaCEP` request body.
pub fn build_soap_envelope(code: &NormalizedCode) -> String {
    format!(
        concat!(
            "<?xml version=\"1.0\"?>\n",
            "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
            "xmlns:cli=\"http://cliente.bean.master.sigep.bsb.correios.com.br/\">\n",
            "  <soapenv:Header />\n",
            "  <soapenv:Body>\n",
            "    <cli:consultaCEP>\n",
            "      <cep>{}</cep>\n",
            "    </cli:consultaCEP>\n",
            "  </soapenv:Body>\n",
            "</soapenv:Envelope>"
        ),
        code
    )
}

/// Text children of the first `<return>` element, keyed by local name.
///
/// `None` when the document has no `<return>` element.
fn read_return_fields(xml: &str) -> Result<Option<HashMap<String, String>>, AdapterError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut in_return = false;
    let mut found = false;
    let mut current: Option<String> = None;
    let mut fields = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();
                if name == "return" && !found {
                    in_return = true;
                    found = true;
                } else if in_return {
                    current = Some(name);
                }
            }
            Ok(Event::Text(t)) => {
                if let Some(name) = &current {
                    let text = t.unescape().map_err(|e| AdapterError::Parse(e.to_string()))?;
                    fields.insert(name.clone(), text.into_owned());
                }
            }
            Ok(Event::End(e)) => {
                if e.local_name().as_ref() == b"return" {
                    in_return = false;
                }
                current = None;
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(AdapterError::Parse(e.to_string())),
            _ => {}
        }
    }

    Ok(found.then_some(fields))
}

/// Text of the first element named `local_name`, if any.
fn read_element_text(xml: &str, local_name: &str) -> Result<Option<String>, AdapterError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut inside = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => inside = e.local_name().as_ref() == local_name.as_bytes(),
            Ok(Event::Text(t)) if inside => {
                let text = t.unescape().map_err(|e| AdapterError::Parse(e.to_string()))?;
                return Ok(Some(text.into_owned()));
            }
            Ok(Event::End(_)) => inside = false,
            Ok(Event::Eof) => return Ok(None),
            Err(e) => return Err(AdapterError::Parse(e.to_string())),
            _ => {}
        }
    }
}

/// Map a successful `consultaCEPResponse` into an address.
pub fn parse_consulta_response(xml: &str) -> Result<AddressResult, AdapterError> {
    let mut fields = read_return_fields(xml)?
        .ok_or_else(|| AdapterError::Parse("missing <return> element".to_string()))?;
    let mut take = |name: &str| fields.remove(name).unwrap_or_default();

    Ok(AddressResult {
        cep: take("cep"),
        state: take("uf"),
        city: take("cidade"),
        neighborhood: take("bairro"),
        street: take("end"),
        service: SERVICE.to_string(),
    })
}

/// `<faultstring>` of a SOAP fault document.
pub fn parse_fault(xml: &str) -> Result<Option<String>, AdapterError> {
    read_element_text(xml, "faultstring")
}

fn into_failure(err: AdapterError) -> ProviderFailure {
    let message = match err {
        AdapterError::Http(e) => format!("could not contact the Correios service: {e}"),
        AdapterError::Parse(_) | AdapterError::Status(_) => {
            "could not interpret the Correios response".to_string()
        }
        other => other.to_string(),
    };
    ProviderFailure::new(message, SERVICE)
}

#[async_trait]
impl CepProvider for CorreiosProvider {
    async fn fetch(&self, code: &NormalizedCode) -> Result<AddressResult, ProviderFailure> {
        self.request(code).await.map_err(into_failure)
    }

    fn service_name(&self) -> &str {
        ProviderKind::Correios.as_str()
    }
}
