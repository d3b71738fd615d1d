// src/main.rs
//
// Calculatrice accumulateur : point d’entrée NATIF + WEB (WASM)
// -------------------------------------------------------------
// But:
// - NATIF (Linux/Windows/macOS) : eframe::run_native + NativeOptions
//                                 + journal tracing (RUST_LOG) + historique fichier JSON
// - WEB  (wasm32)              : eframe::WebRunner + WebOptions + <canvas>
//                                 + historique dans localStorage
//
// Côté WEB (WASM) : ton index.html doit contenir un canvas :
//   <canvas id="the_canvas_id"></canvas>

#![cfg_attr(target_arch = "wasm32", allow(unused_imports))]

use eframe::egui;

mod app;
mod noyau;

use app::{AppCalc, MagasinBoxe};

/// Titre unique (natif + web).
const TITRE_APP: &str = "Calculatrice";

/* ------------------------ Entrée NATIF (PC) ------------------------ */

#[cfg(not(target_arch = "wasm32"))]
fn installer_journal() {
    use tracing_subscriber::EnvFilter;

    let filtre = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filtre).init();
}

/// Fichier JSON sous le répertoire de données ; sinon historique en mémoire seulement.
#[cfg(not(target_arch = "wasm32"))]
fn magasin_natif() -> MagasinBoxe {
    use noyau::historique::{MagasinFichier, MagasinMemoire};

    match MagasinFichier::chemin_par_defaut() {
        Some(chemin) => {
            tracing::info!(chemin = %chemin.display(), "historique persistant");
            Box::new(MagasinFichier::new(chemin))
        }
        None => {
            tracing::warn!("aucun répertoire de données : historique non persistant");
            Box::new(MagasinMemoire::new())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    installer_journal();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(TITRE_APP)
            .with_inner_size([380.0, 640.0])
            .with_min_inner_size([320.0, 520.0]),
        ..Default::default()
    };

    eframe::run_native(
        TITRE_APP,
        options,
        Box::new(|_cc| Ok(Box::new(AppCalc::new(magasin_natif())))),
    )
}

/* ------------------------ Entrée WEB (WASM) ------------------------ */

#[cfg(target_arch = "wasm32")]
fn main() {
    // En wasm32, le démarrage réel passe par `start()` (wasm_bindgen).
}

#[cfg(target_arch = "wasm32")]
mod web {
    use super::{AppCalc, MagasinBoxe, TITRE_APP};
    use crate::noyau::historique::MagasinLocal;
    use crate::noyau::CLE_HISTORIQUE;

    use wasm_bindgen::JsCast;
    use web_sys::{window, HtmlCanvasElement};

    /// ID du canvas attendu dans index.html.
    const CANVAS_ID: &str = "the_canvas_id";

    /// Point d’entrée automatique au chargement de la page.
    /// - Fixe le titre de l’onglet (document.title)
    /// - Récupère le <canvas id="the_canvas_id">
    /// - Démarre eframe WebRunner dessus, historique dans localStorage
    #[wasm_bindgen::prelude::wasm_bindgen(start)]
    pub async fn start() -> Result<(), wasm_bindgen::JsValue> {
        let w = window().ok_or_else(|| js_err("window() indisponible"))?;
        let d = w
            .document()
            .ok_or_else(|| js_err("document() indisponible"))?;

        d.set_title(TITRE_APP);

        let el = d
            .get_element_by_id(CANVAS_ID)
            .ok_or_else(|| js_err("canvas introuvable (id incorrect dans index.html)"))?;

        let canvas: HtmlCanvasElement = el
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| js_err("l’élément trouvé n’est pas un <canvas>"))?;

        let web_options = eframe::WebOptions::default();

        eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|_cc| {
                    let magasin: MagasinBoxe = Box::new(MagasinLocal::new(CLE_HISTORIQUE));
                    Ok(Box::new(AppCalc::new(magasin)))
                }),
            )
            .await
    }

    fn js_err(msg: &str) -> wasm_bindgen::JsValue {
        wasm_bindgen::JsValue::from_str(msg)
    }
}
