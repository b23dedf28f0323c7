use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("A cautela deve conter ao menos um item")]
    EmptyCautela,

    #[error("Policial não encontrado")]
    PersonnelNotFound,

    #[error("Policial inativo não pode receber cautela")]
    PersonnelInactive,

    #[error("Material não encontrado")]
    MaterialNotFound,

    // Material existe mas não está "Disponível" — conflito de cautela
    #[error("Material indisponível para cautela: {0}")]
    MaterialUnavailable(String),

    #[error("Cautela não encontrada")]
    CautelaNotFound,

    #[error("Cautela já encerrada")]
    CautelaAlreadyClosed,

    #[error("Arquivo de backup inválido")]
    InvalidBackup,

    #[error("Erro de armazenamento: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("Erro de serialização: {0}")]
    SerializationError(#[from] serde_json::Error),

    // Variante genérica para qualquer outro erro inesperado
    // `anyhow::Error` é ótimo para capturar o contexto do erro.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }
            AppError::EmptyCautela => (
                StatusCode::BAD_REQUEST,
                "A cautela deve conter ao menos um item.".to_string(),
            ),
            AppError::PersonnelNotFound => {
                (StatusCode::NOT_FOUND, "Policial não encontrado.".to_string())
            }
            AppError::PersonnelInactive => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Policial inativo não pode receber cautela.".to_string(),
            ),
            AppError::MaterialNotFound => {
                (StatusCode::NOT_FOUND, "Material não encontrado.".to_string())
            }
            AppError::MaterialUnavailable(serial) => (
                StatusCode::CONFLICT,
                format!("O material {serial} não está disponível para cautela."),
            ),
            AppError::CautelaNotFound => {
                (StatusCode::NOT_FOUND, "Cautela não encontrada.".to_string())
            }
            AppError::CautelaAlreadyClosed => (
                StatusCode::CONFLICT,
                "Esta cautela já foi encerrada.".to_string(),
            ),
            AppError::InvalidBackup => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Arquivo de backup inválido ou incompleto.".to_string(),
            ),

            // Todos os outros erros (StorageError, InternalServerError) viram 500.
            // O `tracing` vai logar a mensagem detalhada que `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
