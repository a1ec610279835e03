// ==================== IMAGE RELAY ====================
// Upload de avatar: valida o base64 e repassa para o host de imagens.
// O serviço não guarda a imagem, só devolve a URL hospedada.

use crate::config::AppConfig;
use crate::utils::AppError;
use base64::Engine;

/// Aceita tanto base64 puro quanto data URI ("data:image/png;base64,...")
fn strip_data_uri(image: &str) -> &str {
    if image.starts_with("data:") {
        match image.split_once(',') {
            Some((_, data)) => data,
            None => image,
        }
    } else {
        image
    }
}

/// POST /api/company/edit/avatar - Hospeda a imagem e devolve a URL
pub async fn upload_avatar(config: &AppConfig, image: &str) -> Result<String, AppError> {
    let data = strip_data_uri(image.trim());

    // 1. Valida o corpo antes de gastar uma chamada externa
    let decoded = base64::engine::general_purpose::STANDARD
        .decode(data)
        .map_err(|_| AppError::Validation("image must be valid base64".to_string()))?;

    if decoded.is_empty() {
        return Err(AppError::Validation("image must not be empty".to_string()));
    }

    let api_key = config
        .image_api_key
        .as_deref()
        .ok_or_else(|| AppError::Internal("IMAGE_API_KEY not configured".to_string()))?;

    log::info!("🖼️ Relaying avatar upload ({} bytes)", decoded.len());

    // 2. Repassa para o host externo
    let client = reqwest::Client::new();
    let response = client
        .post(&config.image_api_url)
        .timeout(std::time::Duration::from_secs(10))
        .form(&[("key", api_key), ("image", data)])
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("image host unreachable: {}", e)))?;

    if !response.status().is_success() {
        return Err(AppError::Upstream(format!(
            "image host error: {}",
            response.status()
        )));
    }

    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| AppError::Upstream(format!("invalid image host reply: {}", e)))?;

    // 3. Extrai a URL hospedada (formato imgbb; fallback no nível raiz)
    let url = body["data"]["url"]
        .as_str()
        .or_else(|| body["url"].as_str())
        .ok_or_else(|| AppError::Upstream("image host reply had no url".to_string()))?;

    log::info!("✅ Avatar hosted at {}", url);

    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_data_uri() {
        assert_eq!(
            strip_data_uri("data:image/png;base64,AAAA"),
            "AAAA"
        );
        assert_eq!(strip_data_uri("AAAA"), "AAAA");
        // data URI malformada fica como está e falha na validação base64
        assert_eq!(strip_data_uri("data:garbage"), "data:garbage");
    }

    #[tokio::test]
    async fn test_rejects_invalid_base64() {
        let config = AppConfig::test_defaults();

        let result = upload_avatar(&config, "not//valid==base64!!").await;
        assert!(matches!(result, Err(AppError::Validation(_))));

        let result = upload_avatar(&config, "").await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn test_rejects_missing_api_key() {
        let mut config = AppConfig::test_defaults();
        config.image_api_key = None;

        // base64 válido, mas sem chave configurada nada é enviado
        let result = upload_avatar(&config, "aGVsbG8=").await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
