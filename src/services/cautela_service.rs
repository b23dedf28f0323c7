// src/services/cautela_service.rs

use std::collections::HashSet;

use chrono::Utc;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{AuditRepository, CautelasRepository, MaterialsRepository, PersonnelRepository},
    models::{
        cautelas::{Armorer, Cautela, CautelaItem, CautelaStatus},
        materials::{MaterialCategory, MaterialStatus},
    },
};

// Item informado na abertura da cautela. Serial e categoria são
// instantâneos fornecidos pelo chamador; quantidade não positiva é
// corrigida para 1 (política: nunca rejeitar).
#[derive(Debug, Clone)]
pub struct CautelaItemDraft {
    pub material_id: String,
    pub serial_number: String,
    pub category: MaterialCategory,
    pub quantity: i64,
}

impl CautelaItemDraft {
    fn into_item(self) -> CautelaItem {
        CautelaItem {
            material_id: self.material_id,
            serial_number: self.serial_number,
            category: self.category,
            // try_from evita o truncamento do cast direto: qualquer valor
            // fora de 1..=u32::MAX vira 1.
            quantity: u32::try_from(self.quantity)
                .ok()
                .filter(|q| *q >= 1)
                .unwrap_or(1),
        }
    }
}

// Motor de ciclo de vida da cautela: as duas transições de estado
// (saída e devolução) e a propagação de status para os materiais.
// Nenhum outro caminho de código mexe no status de material por causa
// de cautela.
#[derive(Clone)]
pub struct CautelaService {
    materials_repo: MaterialsRepository,
    personnel_repo: PersonnelRepository,
    cautelas_repo: CautelasRepository,
    audit_repo: AuditRepository,
}

impl CautelaService {
    pub fn new(
        materials_repo: MaterialsRepository,
        personnel_repo: PersonnelRepository,
        cautelas_repo: CautelasRepository,
        audit_repo: AuditRepository,
    ) -> Self {
        Self {
            materials_repo,
            personnel_repo,
            cautelas_repo,
            audit_repo,
        }
    }

    // --- SAÍDA DE MATERIAL ---
    // Pré-condições checadas antes de qualquer mutação; falhou, nada muda.
    pub async fn checkout(
        &self,
        personnel_id: &str,
        items: Vec<CautelaItemDraft>,
        armorer: &Armorer,
        notes_out: Option<String>,
        area: Option<String>,
    ) -> Result<Cautela, AppError> {
        if personnel_id.trim().is_empty() {
            return Err(AppError::PersonnelNotFound);
        }
        if items.is_empty() {
            return Err(AppError::EmptyCautela);
        }

        let officer = self.personnel_repo.get(personnel_id).await;
        if let Some(p) = &officer {
            if !p.active {
                return Err(AppError::PersonnelInactive);
            }
        }

        // Ordem de locks: materiais, depois cautelas.
        let mut materials = self.materials_repo.lock().await;
        let mut cautelas = self.cautelas_repo.lock().await;

        // Valida disponibilidade antes de aplicar qualquer coisa. Munição é
        // estoque a granel e fica fora do rastreio por instância; item de
        // instância única repetido na mesma saída é o mesmo conflito que um
        // material já cautelado. Referência a material inexistente é
        // inconsistência tolerada: loga e segue.
        let mut instancias_vistas = HashSet::new();
        for item in &items {
            match materials.iter().find(|m| m.id == item.material_id) {
                Some(m) => {
                    if m.category != MaterialCategory::Ammo {
                        if m.status != MaterialStatus::Available {
                            return Err(AppError::MaterialUnavailable(m.serial_number.clone()));
                        }
                        if !instancias_vistas.insert(m.id.as_str()) {
                            return Err(AppError::MaterialUnavailable(m.serial_number.clone()));
                        }
                    }
                }
                None => {
                    tracing::warn!(
                        material_id = %item.material_id,
                        "Item da cautela referencia material inexistente no catálogo"
                    );
                }
            }
        }

        let cautela = Cautela {
            id: Uuid::new_v4().to_string(),
            personnel_id: personnel_id.to_string(),
            personnel_name: officer
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_else(|| "Desconhecido".to_string()),
            armorer_id: armorer.id.clone(),
            armorer_name: armorer.name.clone(),
            armorer_in_id: None,
            armorer_in_name: None,
            items: items.into_iter().map(CautelaItemDraft::into_item).collect(),
            timestamp_out: Utc::now(),
            timestamp_in: None,
            status: CautelaStatus::Open,
            notes_out: notes_out.filter(|n| !n.is_empty()),
            notes_in: None,
            area: area
                .filter(|a| !a.is_empty())
                .or_else(|| officer.as_ref().map(|p| p.area.clone())),
        };

        // Aplica em cópias e só publica em memória depois de persistir as
        // duas coleções — a transição nunca fica pela metade.
        let mut updated_materials = materials.clone();
        for m in updated_materials.iter_mut() {
            let in_cautela = cautela.items.iter().any(|i| i.material_id == m.id);
            if in_cautela && m.category != MaterialCategory::Ammo {
                m.status = MaterialStatus::CheckedOut;
            }
        }

        let mut updated_cautelas = cautelas.clone();
        updated_cautelas.insert(0, cautela.clone());

        self.materials_repo.persist(&updated_materials)?;
        self.cautelas_repo.persist(&updated_cautelas)?;
        *materials = updated_materials;
        *cautelas = updated_cautelas;
        drop(cautelas);
        drop(materials);

        // A transição já foi persistida; uma falha no log de auditoria não
        // pode desfazê-la nem virar erro para o chamador.
        if let Err(e) = self
            .audit_repo
            .append(
                &armorer.name,
                "Nova Cautela",
                &format!(
                    "Saída de material para {}. {} itens.",
                    cautela.personnel_name,
                    cautela.items.len()
                ),
            )
            .await
        {
            tracing::error!("Falha ao registrar auditoria da saída: {e}");
        }

        Ok(cautela)
    }

    // --- DEVOLUÇÃO ---
    // Devolver cautela que não está OPEN é rejeitado explicitamente; uma
    // segunda devolução jamais redispara os efeitos colaterais.
    pub async fn devolver(
        &self,
        cautela_id: &str,
        armorer: &Armorer,
        notes_in: Option<String>,
    ) -> Result<Cautela, AppError> {
        let mut materials = self.materials_repo.lock().await;
        let mut cautelas = self.cautelas_repo.lock().await;

        let idx = cautelas
            .iter()
            .position(|c| c.id == cautela_id)
            .ok_or(AppError::CautelaNotFound)?;
        if cautelas[idx].status != CautelaStatus::Open {
            return Err(AppError::CautelaAlreadyClosed);
        }

        let mut updated_cautelas = cautelas.clone();
        let cautela = &mut updated_cautelas[idx];
        cautela.status = CautelaStatus::Closed;
        cautela.timestamp_in = Some(Utc::now());
        cautela.notes_in = notes_in.filter(|n| !n.is_empty());
        cautela.armorer_in_id = Some(armorer.id.clone());
        cautela.armorer_in_name = Some(armorer.name.clone());
        let cautela = cautela.clone();

        // Todo material referenciado volta a "Disponível", incondicionalmente
        // (no-op idempotente para munição, que nunca saiu desse status).
        let mut updated_materials = materials.clone();
        for item in &cautela.items {
            match updated_materials
                .iter_mut()
                .find(|m| m.id == item.material_id)
            {
                Some(m) => m.status = MaterialStatus::Available,
                None => {
                    tracing::warn!(
                        material_id = %item.material_id,
                        "Devolução referencia material que não existe mais no catálogo"
                    );
                }
            }
        }

        self.materials_repo.persist(&updated_materials)?;
        self.cautelas_repo.persist(&updated_cautelas)?;
        *materials = updated_materials;
        *cautelas = updated_cautelas;
        drop(cautelas);
        drop(materials);

        if let Err(e) = self
            .audit_repo
            .append(
                &armorer.name,
                "Devolução",
                &format!("Material devolvido por {}", cautela.personnel_name),
            )
            .await
        {
            tracing::error!("Falha ao registrar auditoria da devolução: {e}");
        }

        Ok(cautela)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Store;
    use crate::models::materials::Material;
    use crate::models::personnel::Personnel;
    use tempfile::TempDir;

    fn material(id: &str, category: MaterialCategory, status: MaterialStatus) -> Material {
        Material {
            id: id.to_string(),
            category,
            kind: "Pistola".to_string(),
            model: "PT 840".to_string(),
            serial_number: format!("SN-{id}"),
            manufacturer: "Taurus".to_string(),
            condition: "Bom".to_string(),
            expiry_date: None,
            quantity: None,
            status,
            notes: None,
        }
    }

    fn policial(id: &str, active: bool) -> Personnel {
        Personnel {
            id: id.to_string(),
            name: "Sd Silva".to_string(),
            rank: "Soldado".to_string(),
            matricula: "123456".to_string(),
            cpf: "000.000.000-00".to_string(),
            unit: "1ª Cia".to_string(),
            area: "Centro".to_string(),
            phone: "(85) 99999-0000".to_string(),
            photo_url: None,
            active,
            notes: None,
        }
    }

    fn armeiro() -> Armorer {
        Armorer {
            id: "A1".to_string(),
            name: "Cb Souza".to_string(),
            matricula: "654321".to_string(),
        }
    }

    fn draft(material_id: &str, category: MaterialCategory, quantity: i64) -> CautelaItemDraft {
        CautelaItemDraft {
            material_id: material_id.to_string(),
            serial_number: format!("SN-{material_id}"),
            category,
            quantity,
        }
    }

    struct Ambiente {
        service: CautelaService,
        materials: MaterialsRepository,
        cautelas: CautelasRepository,
        audit: AuditRepository,
        _dir: TempDir,
    }

    async fn ambiente(materials: Vec<Material>, personnel: Vec<Personnel>) -> Ambiente {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path()).unwrap();

        let materials_repo = MaterialsRepository::new(store.clone()).unwrap();
        materials_repo.replace_all(materials).await.unwrap();
        let personnel_repo = PersonnelRepository::new(store.clone()).unwrap();
        personnel_repo.replace_all(personnel).await.unwrap();
        let cautelas_repo = CautelasRepository::new(store.clone()).unwrap();
        let audit_repo = AuditRepository::new(store).unwrap();

        Ambiente {
            service: CautelaService::new(
                materials_repo.clone(),
                personnel_repo,
                cautelas_repo.clone(),
                audit_repo.clone(),
            ),
            materials: materials_repo,
            cautelas: cautelas_repo,
            audit: audit_repo,
            _dir: dir,
        }
    }

    #[tokio::test]
    async fn saida_marca_material_como_em_cautela() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(cautela.status, CautelaStatus::Open);
        assert_eq!(cautela.items.len(), 1);
        assert!(cautela.timestamp_in.is_none());
        assert_eq!(cautela.personnel_name, "Sd Silva");

        let m1 = env.materials.get("M1").await.unwrap();
        assert_eq!(m1.status, MaterialStatus::CheckedOut);

        // a nova cautela entra no topo do histórico
        assert_eq!(env.cautelas.list().await[0].id, cautela.id);
        // e gera exatamente uma entrada de auditoria
        let logs = env.audit.list().await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].action, "Nova Cautela");
    }

    #[tokio::test]
    async fn municao_permanece_disponivel_apos_saida() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Ammo,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        env.service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Ammo, 50)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();

        let m1 = env.materials.get("M1").await.unwrap();
        assert_eq!(m1.status, MaterialStatus::Available);
    }

    #[tokio::test]
    async fn quantidade_nao_positiva_vira_um() {
        let env = ambiente(
            vec![
                material("M1", MaterialCategory::Ammo, MaterialStatus::Available),
                material("M2", MaterialCategory::Magazine, MaterialStatus::Available),
            ],
            vec![policial("P1", true)],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![
                    draft("M1", MaterialCategory::Ammo, 0),
                    draft("M2", MaterialCategory::Magazine, -3),
                ],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();

        assert_eq!(cautela.items[0].quantity, 1);
        assert_eq!(cautela.items[1].quantity, 1);
    }

    #[test]
    fn quantidade_acima_de_u32_vira_um_sem_truncar() {
        // 2^32 passaria num cast direto e viraria 0
        let item = draft("M1", MaterialCategory::Ammo, 4_294_967_296).into_item();
        assert_eq!(item.quantity, 1);

        let item = draft("M1", MaterialCategory::Ammo, 50).into_item();
        assert_eq!(item.quantity, 50);
    }

    #[tokio::test]
    async fn item_repetido_na_mesma_saida_e_conflito() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let err = env
            .service
            .checkout(
                "P1",
                vec![
                    draft("M1", MaterialCategory::Weapon, 1),
                    draft("M1", MaterialCategory::Weapon, 1),
                ],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MaterialUnavailable(_)));

        // nada foi aplicado
        assert_eq!(
            env.materials.get("M1").await.unwrap().status,
            MaterialStatus::Available
        );
        assert!(env.cautelas.list().await.is_empty());
    }

    #[tokio::test]
    async fn municao_repetida_na_mesma_saida_e_aceita() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Ammo,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![
                    draft("M1", MaterialCategory::Ammo, 30),
                    draft("M1", MaterialCategory::Ammo, 20),
                ],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(cautela.items.len(), 2);
    }

    #[tokio::test]
    async fn falha_na_auditoria_nao_desfaz_a_saida() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        // um diretório no lugar do temporário do log faz a escrita falhar
        std::fs::create_dir(env._dir.path().join("sentinela_logs.json.tmp")).unwrap();

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();

        // a transição persistiu mesmo sem a entrada de auditoria
        assert_eq!(cautela.status, CautelaStatus::Open);
        assert_eq!(
            env.materials.get("M1").await.unwrap().status,
            MaterialStatus::CheckedOut
        );
        assert!(env.audit.list().await.is_empty());
    }

    #[tokio::test]
    async fn saida_sem_itens_e_rejeitada_sem_efeitos() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let err = env
            .service
            .checkout("P1", vec![], &armeiro(), None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::EmptyCautela));

        assert!(env.cautelas.list().await.is_empty());
        assert_eq!(
            env.materials.get("M1").await.unwrap().status,
            MaterialStatus::Available
        );
        assert!(env.audit.list().await.is_empty());
    }

    #[tokio::test]
    async fn material_fora_de_disponivel_gera_conflito() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Maintenance,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let err = env
            .service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::MaterialUnavailable(_)));
        assert!(env.cautelas.list().await.is_empty());
    }

    #[tokio::test]
    async fn policial_inativo_nao_recebe_cautela() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", false)],
        )
        .await;

        let err = env
            .service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::PersonnelInactive));
    }

    #[tokio::test]
    async fn policial_desconhecido_recebe_nome_padrao() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P9",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(cautela.personnel_name, "Desconhecido");
    }

    #[tokio::test]
    async fn area_assume_a_do_policial_quando_nao_informada() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(cautela.area.as_deref(), Some("Centro"));
    }

    #[tokio::test]
    async fn referencia_pendurada_e_tolerada_na_saida() {
        // M-fantasma não existe no catálogo; a cautela sai mesmo assim.
        let env = ambiente(vec![], vec![policial("P1", true)]).await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![draft("M-fantasma", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();
        assert_eq!(cautela.status, CautelaStatus::Open);
    }

    #[tokio::test]
    async fn devolucao_fecha_e_restaura_material() {
        let env = ambiente(
            vec![
                material("M1", MaterialCategory::Weapon, MaterialStatus::Available),
                material("M2", MaterialCategory::Ammo, MaterialStatus::Available),
            ],
            vec![policial("P1", true)],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![
                    draft("M1", MaterialCategory::Weapon, 1),
                    draft("M2", MaterialCategory::Ammo, 30),
                ],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();

        let devolvida = env
            .service
            .devolver(&cautela.id, &armeiro(), Some("Sem alterações".to_string()))
            .await
            .unwrap();

        assert_eq!(devolvida.status, CautelaStatus::Closed);
        assert!(devolvida.timestamp_in.is_some());
        assert_eq!(devolvida.armorer_in_name.as_deref(), Some("Cb Souza"));
        // campos imutáveis intactos
        assert_eq!(devolvida.timestamp_out, cautela.timestamp_out);
        assert_eq!(devolvida.personnel_id, cautela.personnel_id);
        assert_eq!(devolvida.items.len(), 2);

        // todo material volta a disponível, inclusive munição
        assert_eq!(
            env.materials.get("M1").await.unwrap().status,
            MaterialStatus::Available
        );
        assert_eq!(
            env.materials.get("M2").await.unwrap().status,
            MaterialStatus::Available
        );
    }

    #[tokio::test]
    async fn segunda_devolucao_e_rejeitada() {
        let env = ambiente(
            vec![material(
                "M1",
                MaterialCategory::Weapon,
                MaterialStatus::Available,
            )],
            vec![policial("P1", true)],
        )
        .await;

        let cautela = env
            .service
            .checkout(
                "P1",
                vec![draft("M1", MaterialCategory::Weapon, 1)],
                &armeiro(),
                None,
                None,
            )
            .await
            .unwrap();
        env.service
            .devolver(&cautela.id, &armeiro(), None)
            .await
            .unwrap();

        let logs_antes = env.audit.list().await.len();
        let err = env
            .service
            .devolver(&cautela.id, &armeiro(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CautelaAlreadyClosed));
        // sem novos efeitos colaterais
        assert_eq!(env.audit.list().await.len(), logs_antes);
    }

    #[tokio::test]
    async fn devolucao_de_cautela_inexistente_e_erro() {
        let env = ambiente(vec![], vec![]).await;
        let err = env
            .service
            .devolver("nao-existe", &armeiro(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::CautelaNotFound));
    }
}
