// src/services/document.rs
//
// Geração de documentos do dealer: o QR Code do link de cadastro e o
// flyer em PDF com a tabela de planos. O QR aponta para
// {PORTAL_BASE_URL}/?dealer=CODIGO — o mesmo contrato de query param
// que o formulário de cadastro lê na outra ponta.

use genpdf::{elements, style, Element};
use image::Luma;
use qrcode::QrCode;

use crate::{
    common::error::AppError,
    db::DealerRepository,
    models::{catalog, dealer::Dealer},
};

// O link estampado no QR: o formulário de cadastro lê ?dealer=CODIGO
// na outra ponta
pub fn registration_url(portal_base_url: &str, dealer_code: &str) -> String {
    format!("{}/?dealer={}", portal_base_url.trim_end_matches('/'), dealer_code)
}

#[derive(Clone)]
pub struct DocumentService {
    dealers: DealerRepository,
    portal_base_url: String,
}

impl DocumentService {
    pub fn new(dealers: DealerRepository, portal_base_url: String) -> Self {
        Self { dealers, portal_base_url }
    }

    pub fn registration_url(&self, dealer_code: &str) -> String {
        registration_url(&self.portal_base_url, dealer_code)
    }

    async fn load_dealer(&self, dealer_code: &str) -> Result<Dealer, AppError> {
        self.dealers
            .find_by_code(dealer_code)
            .await?
            .ok_or(AppError::DealerNotFound)
    }

    fn qr_image(&self, dealer_code: &str) -> Result<image::DynamicImage, AppError> {
        let url = self.registration_url(dealer_code);
        let code = QrCode::new(url.as_bytes())
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        let image_buffer = code.render::<Luma<u8>>().build();
        Ok(image::DynamicImage::ImageLuma8(image_buffer))
    }

    // PNG do QR Code de cadastro do dealer
    pub async fn generate_qr_png(&self, dealer_code: &str) -> Result<Vec<u8>, AppError> {
        // Garante que o código existe antes de estampar o link
        self.load_dealer(dealer_code).await?;

        let dynamic_image = self.qr_image(dealer_code)?;

        let mut buffer = Vec::new();
        dynamic_image
            .write_to(&mut buffer, image::ImageOutputFormat::Png)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }

    // Flyer do dealer: identidade, tabela de planos e QR de cadastro
    pub async fn generate_flyer_pdf(&self, dealer_code: &str) -> Result<Vec<u8>, AppError> {
        let dealer = self.load_dealer(dealer_code).await?;

        // 1. Configura o PDF (fonte carregada da pasta 'fonts/')
        let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None)
            .map_err(|_| AppError::FontNotFound("Fonte não encontrada na pasta ./fonts".to_string()))?;

        let mut doc = genpdf::Document::new(font_family);
        doc.set_title(format!("Flyer {}", dealer.dealer_code));
        let mut decorator = genpdf::SimplePageDecorator::new();
        decorator.set_margins(10);
        doc.set_page_decorator(decorator);

        // --- CABEÇALHO ---
        doc.push(
            elements::Paragraph::new("TAAS — Tyre Assistance & Service")
                .styled(style::Style::new().bold().with_font_size(18)),
        );
        doc.push(
            elements::Paragraph::new(format!(
                "{} · {}",
                dealer.dealer_name, dealer.dealer_code
            ))
            .styled(style::Style::new().with_font_size(12)),
        );
        if let Some(city) = &dealer.dealer_city {
            doc.push(elements::Paragraph::new(city.clone()).styled(style::Style::new().with_font_size(10)));
        }

        doc.push(elements::Break::new(1.5));

        // --- TABELA DE PLANOS ---
        // Pesos das colunas: Plano (4), Vigência (2), Preço (2)
        let mut table = elements::TableLayout::new(vec![4, 2, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));

        let style_bold = style::Style::new().bold();
        table
            .row()
            .element(elements::Paragraph::new("Plano").styled(style_bold))
            .element(elements::Paragraph::new("Vigência").styled(style_bold))
            .element(elements::Paragraph::new("Preço").styled(style_bold))
            .push()
            .expect("Table error");

        for plan in catalog::plans() {
            table
                .row()
                .element(elements::Paragraph::new(plan.name.clone()))
                .element(elements::Paragraph::new(plan.validity.clone()))
                .element(elements::Paragraph::new(format!("₹ {}", plan.price)))
                .push()
                .expect("Table row error");
        }

        doc.push(table);
        doc.push(elements::Break::new(2));

        // --- QR DE CADASTRO ---
        doc.push(
            elements::Paragraph::new("CADASTRE-SE COM ESTE DEALER")
                .styled(style::Style::new().bold().with_font_size(12)),
        );
        doc.push(elements::Paragraph::new(self.registration_url(&dealer.dealer_code)));
        doc.push(elements::Break::new(1));

        let dynamic_image = self.qr_image(&dealer.dealer_code)?;
        let pdf_image = genpdf::elements::Image::from_dynamic_image(dynamic_image)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?
            .with_scale(genpdf::Scale::new(0.5, 0.5));

        doc.push(pdf_image);

        // --- RODAPÉ ---
        doc.push(elements::Break::new(2));
        doc.push(
            elements::Paragraph::new("Assistência 24/7: 01147090909")
                .styled(style::Style::new().italic().with_font_size(8)),
        );

        // 2. Renderiza para buffer (memória)
        let mut buffer = Vec::new();
        doc.render(&mut buffer)
            .map_err(|e| AppError::InternalServerError(anyhow::Error::msg(e.to_string())))?;

        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_de_cadastro_carrega_o_dealer_como_query_param() {
        assert_eq!(
            registration_url("https://taas.example.com", "DLR12345"),
            "https://taas.example.com/?dealer=DLR12345"
        );
        // Barra final da base não duplica
        assert_eq!(
            registration_url("https://taas.example.com/", "DLR12346"),
            "https://taas.example.com/?dealer=DLR12346"
        );
    }
}
