// src/app.rs
//
// Calculatrice accumulateur : module App (racine)
// ----------------------------------------------
// Rôle:
// - Déclarer les sous-modules (etat.rs + vue.rs)
// - Ré-exporter AppCalc (pour main.rs: use crate::app::AppCalc;)
// - Fournir l’impl eframe::App (compatible NATIF + WEB)
// - Traduire le clavier en commandes (aucun champ texte : le clavier est global)

pub mod etat;
pub mod vue;

// Ré-export pratique : `use crate::app::AppCalc;`
pub use etat::{AppCalc, MagasinBoxe};

use eframe::egui;

use crate::noyau::{depuis_touche, Commande};

/// Événements clavier de la frame -> commandes, dans l’ordre reçu.
///
/// - caractères tapés : table `depuis_touche` (chiffres, `.`, opérateurs, `=`, `c`)
/// - Enter = "=", Backspace = DEL, Escape = C
fn commandes_clavier(evenements: &[egui::Event]) -> Vec<Commande> {
    evenements
        .iter()
        .filter_map(|ev| match ev {
            egui::Event::Text(t) => depuis_touche(t),
            egui::Event::Key {
                key, pressed: true, ..
            } => match key {
                egui::Key::Enter => Some(Commande::Egal),
                egui::Key::Backspace => Some(Commande::RetourArriere),
                egui::Key::Escape => Some(Commande::Effacer),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

impl eframe::App for AppCalc {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let commandes = ctx.input(|i| commandes_clavier(&i.events));
        for cmd in commandes {
            self.traiter(cmd);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            self.ui(ui); // méthode publique (dans vue.rs)
        });
    }
}
